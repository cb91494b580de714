//! Per-thread record of the most recent boundary failure.
//!
//! Exported functions signal failure with a null pointer or a `-1` status;
//! the message explaining why lives here until the next failure on the same
//! thread or an explicit clear.

use go_struct_core::Error;
use libc::c_char;
use std::cell::RefCell;
use std::ffi::CString;
use std::ptr;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Stores `error` as this thread's last error.
pub fn set_last_error(error: &Error) {
    // Field values can carry NUL bytes; CString cannot.
    let message = CString::new(error.to_string().replace('\0', " ")).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(message));
}

pub fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

/// Copy of the last error message on this thread
pub fn last_error_message() -> Option<String> {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|message| message.to_string_lossy().into_owned())
    })
}

/// Borrowed pointer to the last error message, or null.
///
/// Valid until the next failure or clear on this thread.
pub(crate) fn last_error_ptr() -> *const c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(ptr::null(), |message| message.as_ptr())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        clear_last_error();
        assert!(last_error_message().is_none());
        assert!(last_error_ptr().is_null());

        set_last_error(&Error::null_pointer("create_go_struct", "name"));
        assert_eq!(
            last_error_message().as_deref(),
            Some("create_go_struct: argument 'name' must not be null")
        );
        assert!(!last_error_ptr().is_null());

        clear_last_error();
        assert!(last_error_message().is_none());
    }

    #[test]
    fn test_nul_in_message_is_replaced() {
        set_last_error(&Error::configuration("bad\0value"));
        assert_eq!(
            last_error_message().as_deref(),
            Some("configuration error: bad value")
        );
        clear_last_error();
    }

    #[test]
    fn test_errors_are_per_thread() {
        set_last_error(&Error::configuration("main thread"));
        let other = std::thread::spawn(last_error_message).join().unwrap();
        assert!(other.is_none());
        assert!(last_error_message().is_some());
        clear_last_error();
    }
}
