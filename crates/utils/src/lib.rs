//! Shared configuration and logging setup for go-struct
//!
//! The FFI crate calls into this crate when a host asks for logging to be
//! switched on; nothing here runs implicitly.

pub mod config;
pub mod logging;

pub use config::*;
pub use logging::*;
