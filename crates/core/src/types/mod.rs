//! Core domain types for describing exported C structures.
//!
//! ## Organization
//!
//! - **`ctype`**: C scalar and pointer types with their loader-side spellings
//! - **`symbols`**: The `create_`/`free_`/`get_`/`set_` naming convention
//! - **`metadata`**: Field and structure descriptions in loader document form
//! - **`registry`**: Lookup of structure metadata loaded from documents

pub mod ctype;
pub mod metadata;
pub mod registry;
pub mod symbols;

// Re-export all public types for convenient access
pub use ctype::*;
pub use metadata::*;
pub use registry::*;
pub use symbols::*;
