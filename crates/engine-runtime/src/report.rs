use chrono::{DateTime, Utc};
use engine_core::metrics::MetricsSnapshot;
use model::{stats::RowsProcessedStats, taxonomy::ImportKind};
use serde::Serialize;
use uuid::Uuid;

/// Outcome of importing one CSV file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub kind: ImportKind,
    pub source: String,
    pub stats: RowsProcessedStats,
    /// Diagnostics raised while this file was processed.
    pub errors: u64,
    pub warnings: u64,
    pub duration_ms: u64,
    /// Set when the file failed as a whole.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.failure.is_none() && self.errors == 0 && self.warnings == 0 && self.stats.is_clean()
    }
}

/// Summary of one import run, printed by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub run_id: Uuid,
    pub model_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub files: Vec<FileReport>,
    pub totals: RowsProcessedStats,
    pub errors: u64,
    pub warnings: u64,
    pub metrics: MetricsSnapshot,
}

impl ImportReport {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            model_id: model_id.into(),
            started_at: Utc::now(),
            finished_at: None,
            files: Vec::new(),
            totals: RowsProcessedStats::default(),
            errors: 0,
            warnings: 0,
            metrics: MetricsSnapshot::default(),
        }
    }

    pub fn push(&mut self, file: FileReport) {
        self.totals += file.stats;
        self.files.push(file);
    }

    /// A run is clean when every row landed and nothing was logged.
    pub fn is_clean(&self) -> bool {
        self.errors == 0 && self.warnings == 0 && self.files.iter().all(FileReport::is_clean)
    }
}
