//! C ABI for the go-struct record
//!
//! This crate builds the `go_struct` shared library. It exports a
//! constructor/destructor pair for a flat `{ const char* name; int32_t age; }`
//! record, discovery-style accessors, a per-thread last-error channel, and a
//! JSON description of the record layout for dynamic loaders.
//!
//! Inside the crate, ownership is carried by [`Record`]; the raw pointer
//! handed to C callers is produced by [`Record::into_raw`] and taken back by
//! [`Record::from_raw`].

pub mod alloc;
pub mod exports;
pub mod last_error;
pub mod metadata;
pub mod record;

pub use exports::*;
pub use last_error::{clear_last_error, last_error_message};
pub use metadata::{record_metadata, record_metadata_json, EXPORTED_SYMBOLS};
pub use record::{MyGoStruct, Record};
