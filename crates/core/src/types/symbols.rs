//! Naming convention for exported structure functions.
//!
//! Loaders find the functions belonging to a structure by prefix:
//! `create_<stem>`, `free_<stem>`, `get_<stem>_<field>` and
//! `set_<stem>_<field>`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static STRUCTURE_SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(create|free|get|set)_([a-zA-Z0-9_]+)$").expect("valid regex"));

/// Role of an exported function relative to its structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Create,
    Free,
    Get,
    Set,
}

impl SymbolKind {
    pub fn prefix(self) -> &'static str {
        match self {
            SymbolKind::Create => "create",
            SymbolKind::Free => "free",
            SymbolKind::Get => "get",
            SymbolKind::Set => "set",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "create" => Some(SymbolKind::Create),
            "free" => Some(SymbolKind::Free),
            "get" => Some(SymbolKind::Get),
            "set" => Some(SymbolKind::Set),
            _ => None,
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// An exported symbol split into its role and the remainder of the name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureSymbol {
    pub kind: SymbolKind,
    pub rest: String,
}

impl StructureSymbol {
    /// Splits `symbol`, returning `None` when it is not structure related.
    pub fn parse(symbol: &str) -> Option<Self> {
        let captures = STRUCTURE_SYMBOL.captures(symbol)?;
        let kind = SymbolKind::from_prefix(captures.get(1)?.as_str())?;
        Some(Self {
            kind,
            rest: captures.get(2)?.as_str().to_string(),
        })
    }

    /// Builds the symbol name for `kind` on `stem`, with an optional field
    pub fn compose(kind: SymbolKind, stem: &str, field: Option<&str>) -> String {
        match field {
            Some(field) => format!("{kind}_{stem}_{field}"),
            None => format!("{kind}_{stem}"),
        }
    }

    /// Whether this symbol operates on the structure named by `stem`.
    pub fn belongs_to(&self, stem: &str) -> bool {
        self.rest == stem || self.field(stem).is_some()
    }

    /// Field an accessor targets, if this is a `get_`/`set_` symbol on `stem`
    pub fn field(&self, stem: &str) -> Option<&str> {
        if !matches!(self.kind, SymbolKind::Get | SymbolKind::Set) {
            return None;
        }
        self.rest
            .strip_prefix(stem)?
            .strip_prefix('_')
            .filter(|field| !field.is_empty())
    }
}

/// Derives the destructor symbol paired with a constructor prefix.
///
/// `create_go_struct` becomes `free_go_struct`. Prefixes not starting with
/// `create_` are returned with `free_` prepended.
pub fn free_symbol_for(create_prefix: &str) -> String {
    match create_prefix.strip_prefix("create_") {
        Some(stem) => format!("free_{stem}"),
        None => format!("free_{create_prefix}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_core_pair() {
        let create = StructureSymbol::parse("create_go_struct").unwrap();
        assert_eq!(create.kind, SymbolKind::Create);
        assert_eq!(create.rest, "go_struct");
        assert!(create.belongs_to("go_struct"));

        let free = StructureSymbol::parse("free_go_struct").unwrap();
        assert_eq!(free.kind, SymbolKind::Free);
        assert!(free.field("go_struct").is_none());
    }

    #[test]
    fn test_parse_accessors_yield_field() {
        let get = StructureSymbol::parse("get_go_struct_name").unwrap();
        assert_eq!(get.kind, SymbolKind::Get);
        assert_eq!(get.field("go_struct"), Some("name"));
        assert!(get.belongs_to("go_struct"));
        assert!(!get.belongs_to("other_struct"));
    }

    #[test]
    fn test_unrelated_symbols_are_rejected() {
        assert!(StructureSymbol::parse("go_struct_metadata_json").is_none());
        assert!(StructureSymbol::parse("create_").is_none());
        assert!(StructureSymbol::parse("destroy_go_struct").is_none());
        assert!(StructureSymbol::parse("create-go-struct").is_none());
    }

    #[test]
    fn test_compose_and_free_symbol() {
        assert_eq!(
            StructureSymbol::compose(SymbolKind::Set, "go_struct", Some("age")),
            "set_go_struct_age"
        );
        assert_eq!(free_symbol_for("create_go_struct"), "free_go_struct");
        assert_eq!(free_symbol_for("go_struct"), "free_go_struct");
    }
}
