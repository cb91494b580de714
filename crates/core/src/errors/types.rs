//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for go-struct operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for go-struct operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Heap allocation could not be satisfied
    Allocation { what: String, size: usize },

    /// A pointer argument was null where the contract requires a value
    NullPointer { operation: String, argument: String },

    /// Text destined for a C string contained an interior NUL byte
    InteriorNul { operation: String, position: usize },

    /// Generic boundary failures
    Ffi { operation: String, message: String },

    /// Configuration errors
    Configuration { message: String },

    /// Structure lookup misses in the metadata registry
    UnknownStructure { name: String },

    /// Structure metadata that is missing required keys or carries bad values
    InvalidMetadata { structure: String, message: String },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}
