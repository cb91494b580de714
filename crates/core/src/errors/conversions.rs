//! Conversion implementations for error types

use super::types::Error;
use std::ffi::NulError;
use std::path::PathBuf;

/// Prefer [`Error::file_system`] when the path is known; this conversion
/// leaves it empty.
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "io".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}

impl From<NulError> for Error {
    fn from(error: NulError) -> Self {
        Error::InteriorNul {
            operation: "CString::new".to_string(),
            position: error.nul_position(),
        }
    }
}
