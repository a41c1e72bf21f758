use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

/// Maps the natural key a row carries in its source CSV to the identifier
/// the store assigned when the entity was persisted.
///
/// Only non-empty keys are ever stored. The map lives for one import run and
/// is never persisted.
#[derive(Debug, Clone, Default)]
pub struct ImportIdMap {
    ids: HashMap<String, String>,
}

impl ImportIdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `import_id -> storage_id`. Returns `false` (and stores nothing)
    /// when the import id is empty.
    pub fn insert(&mut self, import_id: &str, storage_id: &str) -> bool {
        if import_id.is_empty() {
            return false;
        }
        self.ids
            .insert(import_id.to_string(), storage_id.to_string());
        true
    }

    pub fn get(&self, import_id: &str) -> Option<&str> {
        if import_id.is_empty() {
            return None;
        }
        self.ids.get(import_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Import-ID map shared between the batch functions that populate it and the
/// relation transforms that read it. Locks are never held across an await.
#[derive(Debug, Clone, Default)]
pub struct SharedImportIds(Arc<RwLock<ImportIdMap>>);

impl SharedImportIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, import_id: &str, storage_id: &str) -> bool {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(import_id, storage_id)
    }

    pub fn resolve(&self, import_id: &str) -> Option<String> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(import_id)
            .map(str::to_string)
    }

    pub fn len(&self) -> usize {
        self.0.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> ImportIdMap {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
