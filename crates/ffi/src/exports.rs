//! Exported C ABI.
//!
//! Every function here is `extern "C"` and unmangled. Failures never unwind
//! across the boundary: they come back as a null pointer or
//! [`STATUS_ERROR`], with the reason available from
//! [`go_struct_last_error`].

use crate::last_error::{clear_last_error, last_error_ptr, set_last_error};
use crate::metadata::record_metadata_json;
use crate::record::{MyGoStruct, Record};
use go_struct_core::{
    Error, Result, ResultExt, CREATE_SYMBOL, FREE_STRING_SYMBOL, FREE_SYMBOL, GET_AGE_SYMBOL,
    GET_NAME_SYMBOL, INIT_LOGGING_SYMBOL, METADATA_SYMBOL, SET_AGE_SYMBOL, SET_NAME_SYMBOL,
    STATUS_ERROR, STATUS_OK,
};
use go_struct_utils::boundary_span;
use libc::{c_char, c_int};
use std::ffi::{CStr, CString};
use std::ptr;
use tracing::{error, trace, warn};

/// Logs `error` at a level matching its cause and stores it as the last error.
fn report(symbol: &'static str, error: &Error) {
    if error.is_contract_violation() {
        warn!(symbol, error = %error, "contract violation at FFI boundary");
    } else {
        error!(symbol, error = %error, "FFI call failed");
    }
    set_last_error(error);
}

fn status(symbol: &'static str, result: Result<()>) -> c_int {
    match result {
        Ok(()) => STATUS_OK,
        Err(e) => {
            report(symbol, &e);
            STATUS_ERROR
        }
    }
}

/// # Safety
/// `text` must be null or point to a NUL-terminated string.
unsafe fn borrow_text<'a>(
    text: *const c_char,
    symbol: &'static str,
    argument: &'static str,
) -> Result<&'a CStr> {
    if text.is_null() {
        return Err(Error::null_pointer(symbol, argument));
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    Ok(unsafe { CStr::from_ptr(text) })
}

/// # Safety
/// `record` must be null or point to a live `MyGoStruct`.
unsafe fn borrow_record<'a>(
    record: *const MyGoStruct,
    symbol: &'static str,
) -> Result<&'a MyGoStruct> {
    // SAFETY: null or live per the caller's contract.
    unsafe { record.as_ref() }.ok_or_else(|| Error::null_pointer(symbol, "record"))
}

/// Allocates a record holding a copy of `name` and `age`.
///
/// Returns null if `name` is null or memory is exhausted; nothing stays
/// allocated in that case. The caller owns the result and must release it
/// with [`free_go_struct`] exactly once.
///
/// # Safety
/// `name` must be null or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn create_go_struct(name: *const c_char, age: i32) -> *mut MyGoStruct {
    let _span = boundary_span(CREATE_SYMBOL).entered();

    let created = unsafe { borrow_text(name, CREATE_SYMBOL, "name") }
        .and_then(|name| Record::new(name, age))
        .and_then(Record::into_raw);

    match created {
        Ok(record) => {
            trace!(age, "record created");
            record
        }
        Err(e) => {
            report(CREATE_SYMBOL, &e);
            ptr::null_mut()
        }
    }
}

/// Releases a record and its name buffer. Null is a no-op.
///
/// # Safety
/// `record` must be null or a pointer from [`create_go_struct`] that has not
/// been freed. Freeing the same record twice is undefined behaviour.
#[no_mangle]
pub unsafe extern "C" fn free_go_struct(record: *mut MyGoStruct) {
    let _span = boundary_span(FREE_SYMBOL).entered();

    // SAFETY: forwarded from the caller's contract.
    match unsafe { Record::from_raw(record) } {
        Some(owned) => {
            trace!(age = owned.age(), "record freed");
            drop(owned);
        }
        None => trace!("free of null record ignored"),
    }
}

/// Borrows the record's name. Null if the record or its name is null.
///
/// The pointer stays valid until the name is replaced or the record freed.
///
/// # Safety
/// `record` must be null or point to a live `MyGoStruct`.
#[no_mangle]
pub unsafe extern "C" fn get_go_struct_name(record: *const MyGoStruct) -> *const c_char {
    let _span = boundary_span(GET_NAME_SYMBOL).entered();

    match unsafe { borrow_record(record, GET_NAME_SYMBOL) } {
        Ok(record) => record.name,
        Err(e) => {
            report(GET_NAME_SYMBOL, &e);
            ptr::null()
        }
    }
}

/// Reads the record's age; 0 for a null record.
///
/// # Safety
/// `record` must be null or point to a live `MyGoStruct`.
#[no_mangle]
pub unsafe extern "C" fn get_go_struct_age(record: *const MyGoStruct) -> i32 {
    let _span = boundary_span(GET_AGE_SYMBOL).entered();

    match unsafe { borrow_record(record, GET_AGE_SYMBOL) } {
        Ok(record) => record.age,
        Err(e) => {
            report(GET_AGE_SYMBOL, &e);
            0
        }
    }
}

/// Overwrites the record's age.
///
/// # Safety
/// `record` must be null or point to a live `MyGoStruct`.
#[no_mangle]
pub unsafe extern "C" fn set_go_struct_age(record: *mut MyGoStruct, age: i32) -> c_int {
    let _span = boundary_span(SET_AGE_SYMBOL).entered();

    // SAFETY: null or live per the caller's contract.
    let result = unsafe { record.as_mut() }
        .ok_or_else(|| Error::null_pointer(SET_AGE_SYMBOL, "record"))
        .map(|record| record.age = age);
    status(SET_AGE_SYMBOL, result)
}

/// Replaces the record's name with a copy of `name`.
///
/// The old buffer is freed only after the copy succeeds; on failure the
/// record is left untouched.
///
/// # Safety
/// `record` must be null or a live record from [`create_go_struct`];
/// `name` must be null or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn set_go_struct_name(
    record: *mut MyGoStruct,
    name: *const c_char,
) -> c_int {
    let _span = boundary_span(SET_NAME_SYMBOL).entered();

    let result = (|| {
        // SAFETY: null or live per the caller's contract.
        let record = unsafe { record.as_mut() }
            .ok_or_else(|| Error::null_pointer(SET_NAME_SYMBOL, "record"))?;
        let name = unsafe { borrow_text(name, SET_NAME_SYMBOL, "name") }?;
        // SAFETY: records from create_go_struct own their name buffer.
        unsafe { record.replace_name(name) }
    })();
    status(SET_NAME_SYMBOL, result)
}

/// Returns the record's metadata document as an owned JSON string.
///
/// Release the result with [`go_struct_free_string`]. Null on failure.
#[no_mangle]
pub extern "C" fn go_struct_metadata_json() -> *mut c_char {
    let rendered = record_metadata_json()
        .and_then(|json| CString::new(json).map_err(Error::from))
        .ffi_context(METADATA_SYMBOL);

    match rendered {
        Ok(json) => json.into_raw(),
        Err(e) => {
            report(METADATA_SYMBOL, &e);
            ptr::null_mut()
        }
    }
}

/// Releases a string returned by this library. Null is a no-op.
///
/// # Safety
/// `text` must be null or a pointer from [`go_struct_metadata_json`] that
/// has not been freed.
#[no_mangle]
pub unsafe extern "C" fn go_struct_free_string(text: *mut c_char) {
    if text.is_null() {
        trace!(symbol = FREE_STRING_SYMBOL, "free of null string ignored");
        return;
    }
    // SAFETY: text came from CString::into_raw in go_struct_metadata_json.
    drop(unsafe { CString::from_raw(text) });
}

/// Message for the most recent failure on this thread, or null.
///
/// Borrowed: valid until the next failing call or [`go_struct_clear_error`]
/// on the same thread.
#[no_mangle]
pub extern "C" fn go_struct_last_error() -> *const c_char {
    last_error_ptr()
}

#[no_mangle]
pub extern "C" fn go_struct_clear_error() {
    clear_last_error();
}

/// Installs a stderr logger configured from `GO_STRUCT_LOG*` variables.
///
/// Returns [`STATUS_ERROR`] if the configuration is invalid or a global
/// logger is already installed.
#[no_mangle]
pub extern "C" fn go_struct_init_logging() -> c_int {
    status(INIT_LOGGING_SYMBOL, go_struct_utils::init_from_env())
}
