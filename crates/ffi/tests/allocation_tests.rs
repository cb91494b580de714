//! Allocation accounting across create/free
//!
//! A counting global allocator records allocations and deallocations per
//! thread, and can be told to fail the n-th allocation on the current
//! thread so exhaustion paths are exercised without exhausting anything.

use go_struct::{clear_last_error, create_go_struct, free_go_struct, last_error_message};
use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::ffi::CString;
use std::ptr;

struct CountingAllocator;

thread_local! {
    static ALLOCS: Cell<usize> = const { Cell::new(0) };
    static DEALLOCS: Cell<usize> = const { Cell::new(0) };
    static LIVE_BYTES: Cell<isize> = const { Cell::new(0) };
    /// Allocation index (1-based, counted from arming) that should fail
    static FAIL_AT: Cell<Option<usize>> = const { Cell::new(None) };
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let fail = FAIL_AT
            .try_with(|fail_at| match fail_at.get() {
                Some(1) => {
                    fail_at.set(None);
                    true
                }
                Some(n) => {
                    fail_at.set(Some(n - 1));
                    false
                }
                None => false,
            })
            .unwrap_or(false);
        if fail {
            return ptr::null_mut();
        }

        let _ = ALLOCS.try_with(|count| count.set(count.get() + 1));
        let _ = LIVE_BYTES.try_with(|live| live.set(live.get() + layout.size() as isize));
        // SAFETY: forwarded unchanged to the system allocator.
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        let _ = DEALLOCS.try_with(|count| count.set(count.get() + 1));
        let _ = LIVE_BYTES.try_with(|live| live.set(live.get() - layout.size() as isize));
        // SAFETY: ptr was allocated by System with this layout.
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    allocs: usize,
    deallocs: usize,
    live_bytes: isize,
}

fn snapshot() -> Snapshot {
    Snapshot {
        allocs: ALLOCS.with(Cell::get),
        deallocs: DEALLOCS.with(Cell::get),
        live_bytes: LIVE_BYTES.with(Cell::get),
    }
}

fn fail_nth_allocation(n: usize) {
    FAIL_AT.with(|fail_at| fail_at.set(Some(n)));
}

/// Runs one create/free cycle so lazily initialised state is not counted.
fn warm_up() {
    let input = CString::new("warm").unwrap();
    // SAFETY: valid input; freed once.
    unsafe { free_go_struct(create_go_struct(input.as_ptr(), 0)) };
    // SAFETY: null name is a detected failure path.
    let failed = unsafe { create_go_struct(ptr::null(), 0) };
    assert!(failed.is_null());
    fail_nth_allocation(1);
    // SAFETY: valid input; the allocation failure yields null.
    let failed = unsafe { create_go_struct(input.as_ptr(), 0) };
    assert!(failed.is_null());
    clear_last_error();
}

#[test]
fn test_alice_is_exactly_two_allocations_and_two_frees() {
    warm_up();
    let input = CString::new("Alice").unwrap();

    let before = snapshot();
    // SAFETY: valid input.
    let record = unsafe { create_go_struct(input.as_ptr(), 30) };
    let created = snapshot();
    // SAFETY: record from create_go_struct, freed once.
    unsafe { free_go_struct(record) };
    let freed = snapshot();

    assert!(!record.is_null());
    assert_eq!(created.allocs - before.allocs, 2);
    assert_eq!(created.deallocs, before.deallocs);
    assert_eq!(freed.deallocs - created.deallocs, 2);
    assert_eq!(freed.allocs, created.allocs);
}

#[test]
fn test_name_buffer_is_exactly_text_plus_terminator() {
    warm_up();
    let input = CString::new("Alice").unwrap();

    let before = snapshot();
    // SAFETY: valid input.
    let record = unsafe { create_go_struct(input.as_ptr(), 30) };
    let grown = snapshot().live_bytes - before.live_bytes;
    // SAFETY: freed once.
    unsafe { free_go_struct(record) };

    let expected = "Alice".len() + 1 + std::mem::size_of::<go_struct::MyGoStruct>();
    assert_eq!(grown, expected as isize);
}

#[test]
fn test_create_free_cycles_leak_nothing() {
    warm_up();
    let inputs: Vec<CString> = ["", "a", "Alice", "a much longer name than the others"]
        .iter()
        .map(|text| CString::new(*text).unwrap())
        .collect();

    let before = snapshot();
    for round in 0..100 {
        let input = &inputs[round % inputs.len()];
        // SAFETY: valid input; freed once.
        unsafe { free_go_struct(create_go_struct(input.as_ptr(), round as i32)) };
    }
    let after = snapshot();

    assert_eq!(after.allocs - before.allocs, after.deallocs - before.deallocs);
    assert_eq!(after.live_bytes, before.live_bytes);
}

#[test]
fn test_free_null_touches_no_memory() {
    warm_up();
    let before = snapshot();
    // SAFETY: null is explicitly allowed.
    unsafe { free_go_struct(ptr::null_mut()) };
    assert_eq!(snapshot(), before);
}

#[test]
fn test_name_allocation_failure_returns_null() {
    warm_up();
    let input = CString::new("Alice").unwrap();

    let before = snapshot();
    fail_nth_allocation(1);
    // SAFETY: valid input.
    let record = unsafe { create_go_struct(input.as_ptr(), 30) };
    assert!(record.is_null());

    let message = last_error_message().expect("failure should be recorded");
    assert!(message.contains("failed to allocate 6 bytes"));
    drop(message);
    clear_last_error();

    assert_eq!(snapshot().live_bytes, before.live_bytes);
}

#[test]
fn test_record_allocation_failure_releases_name() {
    warm_up();
    let input = CString::new("Alice").unwrap();

    let before = snapshot();
    fail_nth_allocation(2);
    // SAFETY: valid input.
    let record = unsafe { create_go_struct(input.as_ptr(), 30) };
    assert!(record.is_null());

    let message = last_error_message().expect("failure should be recorded");
    assert!(message.contains("MyGoStruct"));
    drop(message);
    clear_last_error();

    // The name buffer was allocated and then released before returning
    assert_eq!(snapshot().live_bytes, before.live_bytes);
}
