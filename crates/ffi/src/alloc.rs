//! Fallible allocation for memory handed across the C boundary.
//!
//! The global allocator aborts the process when it cannot satisfy a request.
//! These helpers report exhaustion as [`Error::Allocation`] instead, so the
//! exported functions can return a null sentinel.

use go_struct_core::{Error, Result};
use std::alloc::{self, Layout};
use std::ffi::{CStr, CString};
use std::ptr::NonNull;

/// Copies `text` into a new buffer sized exactly to its bytes plus the
/// terminator.
pub fn copy_c_str(text: &CStr) -> Result<CString> {
    let bytes = text.to_bytes_with_nul();

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(bytes.len())
        .map_err(|_| Error::allocation("name buffer", bytes.len()))?;
    buffer.extend_from_slice(bytes);

    // SAFETY: the bytes come from a CStr, so the only NUL is the last byte.
    Ok(unsafe { CString::from_vec_with_nul_unchecked(buffer) })
}

/// Moves `value` into a new heap block without aborting on exhaustion.
///
/// The block has the same layout `Box<T>` uses, so ownership is released
/// with `Box::from_raw`. On failure `value` is dropped here.
pub fn try_box<T>(value: T, what: &str) -> Result<NonNull<T>> {
    let layout = Layout::new::<T>();

    let block = if layout.size() == 0 {
        NonNull::dangling()
    } else {
        // SAFETY: layout has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) }.cast::<T>();
        NonNull::new(raw).ok_or_else(|| Error::allocation(what, layout.size()))?
    };

    // SAFETY: block is valid for writes of T and suitably aligned.
    unsafe { block.as_ptr().write(value) };
    Ok(block)
}
