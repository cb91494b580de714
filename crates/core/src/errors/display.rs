//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Allocation { what, size } => {
                write!(f, "failed to allocate {size} bytes for {what}")
            }
            Error::NullPointer {
                operation,
                argument,
            } => {
                write!(f, "{operation}: argument '{argument}' must not be null")
            }
            Error::InteriorNul {
                operation,
                position,
            } => {
                write!(
                    f,
                    "{operation}: text contains an interior NUL byte at offset {position}"
                )
            }
            Error::Ffi { operation, message } => {
                write!(f, "FFI operation '{operation}' failed: {message}")
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::UnknownStructure { name } => {
                write!(f, "unknown structure: {name}")
            }
            Error::InvalidMetadata { structure, message } => {
                write!(f, "invalid metadata for structure '{structure}': {message}")
            }
            Error::FileSystem {
                path,
                operation,
                source,
            } if path.as_os_str().is_empty() => {
                write!(f, "file system {operation} operation failed: {source}")
            }
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system {} operation failed for '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            Error::Json { message, .. } => {
                write!(f, "JSON error: {message}")
            }
        }
    }
}
