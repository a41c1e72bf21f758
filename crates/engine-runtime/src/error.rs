use engine_config::SettingsError;
use engine_core::error::StoreError;
use engine_processing::error::{BatchError, ExportError, ImportError};
use model::taxonomy::ImportKind;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level errors for an import or export run.
#[derive(Debug, Error)]
pub enum RunError {
    /// A file failed as a whole. Files imported before it stay imported.
    #[error("Import of {kind} from '{source_name}' failed: {error}")]
    Import {
        kind: ImportKind,
        source_name: String,
        #[source]
        error: ImportError,
    },

    /// The kind cannot be imported in the current phase.
    #[error("{kind} cannot be imported while {phase}")]
    WrongPhase {
        kind: ImportKind,
        phase: &'static str,
    },

    #[error("Export of {kind} failed: {error}")]
    Export {
        kind: ImportKind,
        #[source]
        error: ExportError,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Batch configuration error: {0}")]
    Batch(#[from] BatchError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
