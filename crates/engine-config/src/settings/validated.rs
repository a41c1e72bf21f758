use super::batch_size::BatchSizes;
use connectors::source::CsvSource;
use model::taxonomy::ImportKind;
use std::path::PathBuf;

/// Immutable, validated configuration for one import run.
#[derive(Debug, Clone)]
pub struct ValidatedImportSettings {
    pub model_id: String,
    pub store_path: PathBuf,
    pub batch_sizes: BatchSizes,
    /// Sources in import order: every entity kind before any link kind, and
    /// manifest order within a kind.
    pub sources: Vec<(ImportKind, CsvSource)>,
}

impl ValidatedImportSettings {
    pub fn batch_size(&self, kind: ImportKind) -> usize {
        self.batch_sizes.for_kind(kind)
    }

    pub fn entity_sources(&self) -> impl Iterator<Item = &(ImportKind, CsvSource)> {
        self.sources.iter().filter(|(kind, _)| kind.is_entity())
    }

    pub fn link_sources(&self) -> impl Iterator<Item = &(ImportKind, CsvSource)> {
        self.sources.iter().filter(|(kind, _)| !kind.is_entity())
    }
}
