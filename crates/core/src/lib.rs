//! Core domain types, errors, and constants for go-struct.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias
//!   shared by the FFI surface and its supporting crates.
//! - **`types`**: The C type model, structure metadata, and the symbol naming
//!   convention dynamic loaders use to find a structure's functions.
//! - **`constants`**: Exported symbol names, environment variable names, and
//!   status codes.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result, ResultExt},
    types::*,
};
