//! Structure metadata in the document shape dynamic loaders register.
//!
//! A metadata document is a JSON object keyed by structure name:
//!
//! ```json
//! {
//!   "MyGoStruct": {
//!     "fields": { "name": { "type": "str", "ctype": "c_char_p", ... } },
//!     "dll_path": "libgo_struct.so",
//!     "function_prefix": "create_go_struct",
//!     "description": "...",
//!     "version": "1.0.0"
//!   }
//! }
//! ```
//!
//! Field order in `fields` is the in-memory field order.

use crate::constants::METADATA_VERSION;
use crate::errors::{Error, Result};
use crate::types::ctype::CType;
use crate::types::symbols::{free_symbol_for, StructureSymbol, SymbolKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One field of an exported structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMetadata {
    /// Filled from the key of the `fields` map
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "type")]
    pub host_type: String,
    pub ctype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_type: Option<CType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldMetadata {
    /// Describes a field of type `c_type` at byte `offset`
    pub fn new(name: impl Into<String>, c_type: CType, offset: usize) -> Self {
        Self {
            name: name.into(),
            host_type: c_type.host_type().to_string(),
            ctype: c_type.ctypes_name().to_string(),
            c_type: Some(c_type),
            offset: Some(offset),
            size: Some(c_type.size()),
            nullable: false,
            description: None,
        }
    }

    #[must_use]
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Full description of one exported structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureMetadata {
    /// Filled from the key of the document map
    #[serde(skip)]
    pub name: String,
    pub fields: IndexMap<String, FieldMetadata>,
    pub dll_path: String,
    pub function_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<usize>,
    /// Exported functions by role; accessors are keyed `get_<field>`/`set_<field>`
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub methods: IndexMap<String, String>,
}

fn default_version() -> String {
    METADATA_VERSION.to_string()
}

impl StructureMetadata {
    pub fn new(
        name: impl Into<String>,
        dll_path: impl Into<String>,
        function_prefix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            dll_path: dll_path.into(),
            function_prefix: function_prefix.into(),
            description: None,
            version: default_version(),
            size: None,
            alignment: None,
            methods: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldMetadata) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    #[must_use]
    pub fn with_layout(mut self, size: usize, alignment: usize) -> Self {
        self.size = Some(size);
        self.alignment = Some(alignment);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Files every structure-related symbol in `symbols` that belongs to
    /// this structure into the method table.
    #[must_use]
    pub fn with_methods<'a>(mut self, symbols: impl IntoIterator<Item = &'a str>) -> Self {
        let Some(stem) = self.symbol_stem().map(str::to_string) else {
            return self;
        };
        for symbol in symbols {
            let Some(parsed) = StructureSymbol::parse(symbol) else {
                continue;
            };
            if !parsed.belongs_to(&stem) {
                continue;
            }
            let key = match parsed.field(&stem) {
                Some(field) => format!("{}_{field}", parsed.kind),
                None => parsed.kind.to_string(),
            };
            self.methods.insert(key, symbol.to_string());
        }
        self
    }

    /// Stem shared by all of this structure's symbols (`go_struct`)
    pub fn symbol_stem(&self) -> Option<&str> {
        self.function_prefix.strip_prefix("create_")
    }

    /// Destructor paired with `function_prefix`
    pub fn free_symbol(&self) -> String {
        free_symbol_for(&self.function_prefix)
    }

    pub fn method(&self, kind: SymbolKind, field: Option<&str>) -> Option<&str> {
        let key = match field {
            Some(field) => format!("{kind}_{field}"),
            None => kind.to_string(),
        };
        self.methods.get(&key).map(String::as_str)
    }

    /// Checks the invariants a loader relies on.
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(Error::invalid_metadata(&self.name, "structure has no fields"));
        }

        match StructureSymbol::parse(&self.function_prefix) {
            Some(symbol) if symbol.kind == SymbolKind::Create => {}
            _ => {
                return Err(Error::invalid_metadata(
                    &self.name,
                    format!(
                        "function_prefix '{}' is not a create_ symbol",
                        self.function_prefix
                    ),
                ))
            }
        }

        for (key, field) in &self.fields {
            if CType::from_ctypes_name(&field.ctype).is_none() {
                return Err(Error::invalid_metadata(
                    &self.name,
                    format!("field '{key}' has unknown ctype '{}'", field.ctype),
                ));
            }
            if let (Some(offset), Some(field_size), Some(size)) =
                (field.offset, field.size, self.size)
            {
                if offset.checked_add(field_size).map_or(true, |end| end > size) {
                    return Err(Error::invalid_metadata(
                        &self.name,
                        format!("field '{key}' extends past the end of the structure"),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Restores the names that live in map keys rather than in the values.
    pub(crate) fn adopt_keys(&mut self, name: &str) {
        self.name = name.to_string();
        for (key, field) in self.fields.iter_mut() {
            field.name = key.clone();
        }
    }

    /// Serialises this structure as a single-entry metadata document
    pub fn to_document_json(&self) -> Result<String> {
        let mut document = IndexMap::new();
        document.insert(self.name.as_str(), self);
        Ok(serde_json::to_string_pretty(&document)?)
    }
}
