//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

impl Error {
    /// Create an allocation failure error
    #[must_use]
    pub fn allocation(what: impl Into<String>, size: usize) -> Self {
        Error::Allocation {
            what: what.into(),
            size,
        }
    }

    /// Create a null pointer contract violation
    #[must_use]
    pub fn null_pointer(operation: impl Into<String>, argument: impl Into<String>) -> Self {
        Error::NullPointer {
            operation: operation.into(),
            argument: argument.into(),
        }
    }

    /// Create an interior NUL error
    #[must_use]
    pub fn interior_nul(operation: impl Into<String>, position: usize) -> Self {
        Error::InteriorNul {
            operation: operation.into(),
            position,
        }
    }

    /// Create an FFI error
    #[must_use]
    pub fn ffi(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Ffi {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unknown_structure(name: impl Into<String>) -> Self {
        Error::UnknownStructure { name: name.into() }
    }

    /// Create an invalid metadata error for a named structure
    #[must_use]
    pub fn invalid_metadata(structure: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidMetadata {
            structure: structure.into(),
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// True for failures caused by the caller breaking the boundary contract,
    /// as opposed to resource exhaustion.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::NullPointer { .. } | Error::InteriorNul { .. }
        )
    }
}
