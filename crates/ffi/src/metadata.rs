//! Self-description of the exported record for dynamic loaders

use crate::record::MyGoStruct;
use go_struct_core::{
    CType, FieldMetadata, Result, StructureMetadata, CLEAR_ERROR_SYMBOL, CREATE_SYMBOL,
    FREE_STRING_SYMBOL, FREE_SYMBOL, GET_AGE_SYMBOL, GET_NAME_SYMBOL, INIT_LOGGING_SYMBOL,
    LAST_ERROR_SYMBOL, LIBRARY_FILE_NAME, METADATA_SYMBOL, SET_AGE_SYMBOL, SET_NAME_SYMBOL,
    STRUCT_DESCRIPTION, STRUCT_NAME,
};
use once_cell::sync::Lazy;
use std::mem::{align_of, offset_of, size_of};

/// Every symbol this library exports
pub const EXPORTED_SYMBOLS: &[&str] = &[
    CREATE_SYMBOL,
    FREE_SYMBOL,
    GET_NAME_SYMBOL,
    GET_AGE_SYMBOL,
    SET_NAME_SYMBOL,
    SET_AGE_SYMBOL,
    METADATA_SYMBOL,
    FREE_STRING_SYMBOL,
    LAST_ERROR_SYMBOL,
    CLEAR_ERROR_SYMBOL,
    INIT_LOGGING_SYMBOL,
];

static RECORD_METADATA: Lazy<StructureMetadata> = Lazy::new(|| {
    StructureMetadata::new(STRUCT_NAME, LIBRARY_FILE_NAME, CREATE_SYMBOL)
        .with_description(STRUCT_DESCRIPTION)
        .with_field(
            FieldMetadata::new("name", CType::ConstCharPtr, offset_of!(MyGoStruct, name))
                .nullable(true)
                .described("NUL-terminated copy of the text passed to create_go_struct"),
        )
        .with_field(
            FieldMetadata::new("age", CType::Int32, offset_of!(MyGoStruct, age))
                .described("signed 32-bit age"),
        )
        .with_layout(size_of::<MyGoStruct>(), align_of::<MyGoStruct>())
        .with_methods(EXPORTED_SYMBOLS.iter().copied())
});

/// Layout and method table of `MyGoStruct`
pub fn record_metadata() -> &'static StructureMetadata {
    &RECORD_METADATA
}

/// `record_metadata` as a loader metadata document
pub fn record_metadata_json() -> Result<String> {
    RECORD_METADATA.to_document_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use go_struct_core::{MetadataRegistry, SymbolKind};

    #[test]
    fn test_layout_matches_repr_c() {
        let meta = record_metadata();
        assert_eq!(meta.fields["name"].offset, Some(0));
        assert_eq!(meta.fields["age"].offset, Some(size_of::<*const u8>()));
        assert_eq!(meta.size, Some(size_of::<MyGoStruct>()));
        assert_eq!(meta.alignment, Some(align_of::<*const u8>()));
        assert!(meta.validate().is_ok());
    }

    #[test]
    fn test_method_table_covers_record_symbols() {
        let meta = record_metadata();
        assert_eq!(meta.method(SymbolKind::Create, None), Some(CREATE_SYMBOL));
        assert_eq!(meta.method(SymbolKind::Free, None), Some(FREE_SYMBOL));
        assert_eq!(meta.method(SymbolKind::Get, Some("name")), Some(GET_NAME_SYMBOL));
        assert_eq!(meta.method(SymbolKind::Get, Some("age")), Some(GET_AGE_SYMBOL));
        assert_eq!(meta.method(SymbolKind::Set, Some("name")), Some(SET_NAME_SYMBOL));
        assert_eq!(meta.method(SymbolKind::Set, Some("age")), Some(SET_AGE_SYMBOL));
        assert_eq!(meta.methods.len(), 6);
    }

    #[test]
    fn test_document_loads_into_registry() {
        let json = record_metadata_json().unwrap();
        let mut registry = MetadataRegistry::new();
        assert_eq!(registry.register_from_json(&json).unwrap(), 1);

        let loaded = registry.get_structure(STRUCT_NAME).unwrap();
        assert_eq!(loaded, record_metadata());
    }
}
