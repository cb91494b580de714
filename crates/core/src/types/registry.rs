//! Registry of structure metadata loaded from JSON documents

use crate::errors::{Error, Result};
use crate::types::metadata::StructureMetadata;
use indexmap::IndexMap;
use std::path::Path;

/// Structures known to a loader, keyed by structure name
#[derive(Debug, Default, Clone)]
pub struct MetadataRegistry {
    structures: IndexMap<String, StructureMetadata>,
}

impl MetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `metadata` after validating it, replacing any structure with the
    /// same name.
    pub fn register(&mut self, metadata: StructureMetadata) -> Result<()> {
        metadata.validate()?;
        tracing::debug!(structure = %metadata.name, fields = metadata.fields.len(), "registered structure");
        self.structures.insert(metadata.name.clone(), metadata);
        Ok(())
    }

    /// Registers every structure in a metadata document.
    ///
    /// Returns the number of structures registered. Nothing is registered
    /// if any entry is invalid.
    pub fn register_from_json(&mut self, json: &str) -> Result<usize> {
        let document: IndexMap<String, serde_json::Value> = serde_json::from_str(json)?;

        let mut parsed = Vec::with_capacity(document.len());
        for (name, entry) in document {
            let mut metadata: StructureMetadata = serde_json::from_value(entry)
                .map_err(|e| Error::invalid_metadata(&name, e.to_string()))?;
            metadata.adopt_keys(&name);
            metadata.validate()?;
            parsed.push(metadata);
        }

        let count = parsed.len();
        for metadata in parsed {
            self.register(metadata)?;
        }
        Ok(count)
    }

    /// Reads a metadata document from disk and registers it
    pub fn register_from_path(&mut self, path: &Path) -> Result<usize> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::file_system(path, "read", e))?;
        self.register_from_json(&json).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to load structure metadata");
            e
        })
    }

    pub fn get_structure(&self, name: &str) -> Result<&StructureMetadata> {
        self.structures
            .get(name)
            .ok_or_else(|| Error::unknown_structure(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.structures.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}
