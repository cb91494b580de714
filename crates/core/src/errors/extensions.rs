//! Extension traits for error handling

use super::types::{Error, Result};

/// Extension trait for labelling failures with where they happened
pub trait ResultExt<T> {
    /// Re-labels the error as a configuration error, prefixed with the
    /// lazily built `f()`.
    fn config_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Attributes the error to the exported function `operation`.
    ///
    /// Allocation failures and contract violations are already specific and
    /// pass through unchanged; anything else becomes [`Error::Ffi`].
    fn ffi_context(self, operation: &'static str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn config_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let detail = match e.into() {
                Error::Configuration { message } => message,
                other => other.to_string(),
            };
            Error::Configuration {
                message: format!("{}: {}", f(), detail),
            }
        })
    }

    fn ffi_context(self, operation: &'static str) -> Result<T> {
        self.map_err(|e| match e.into() {
            specific @ (Error::Allocation { .. }
            | Error::NullPointer { .. }
            | Error::InteriorNul { .. }
            | Error::Ffi { .. }) => specific,
            other => Error::ffi(operation, other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_context_prefixes_message() {
        let failed: Result<()> = Err(Error::configuration("bad flag"));
        let err = failed.config_context(|| "GO_STRUCT_LOG_ANSI".to_string()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: GO_STRUCT_LOG_ANSI: bad flag"
        );
    }

    #[test]
    fn test_config_context_keeps_foreign_error_text() {
        let failed: std::result::Result<(), serde_json::Error> =
            serde_json::from_str::<()>("{").map(|_| ());
        let err = failed.config_context(|| "settings".to_string()).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("configuration error: settings: JSON error: "));
    }

    #[test]
    fn test_ffi_context_wraps_generic_errors() {
        let failed: std::result::Result<(), serde_json::Error> =
            serde_json::from_str::<()>("{").map(|_| ());
        let err = failed.ffi_context("go_struct_metadata_json").unwrap_err();
        assert!(matches!(err, Error::Ffi { ref operation, .. } if operation == "go_struct_metadata_json"));
    }

    #[test]
    fn test_ffi_context_keeps_allocation_failures() {
        let failed: Result<()> = Err(Error::allocation("name buffer", 4));
        let err = failed.ffi_context("create_go_struct").unwrap_err();
        assert!(matches!(err, Error::Allocation { size: 4, .. }));
    }
}
