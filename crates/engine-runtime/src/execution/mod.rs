pub mod exporter;
pub mod importer;
pub mod inspect;

pub use exporter::{ExportSummary, Exporter};
pub use importer::{
    ImportingEntities, ImportingRelations, TaxonomyImport, run_manifest, run_manifest_with_store,
};
pub use inspect::{KindCount, count_documents};
