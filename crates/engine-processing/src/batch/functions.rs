//! The batch functions plugged into [`BatchProcessor`](super::BatchProcessor).
//!
//! All three share one shape: one bulk write per batch, storage errors turned
//! into all-failed stats with a single logged error, and at most one summary
//! warning per batch.

use super::processor::BatchFn;
use async_trait::async_trait;
use engine_core::{
    diagnostics::{Diagnostics, SharedDiagnostics},
    error::StoreError,
    repository::Repository,
};
use model::{import_id::SharedImportIds, stats::RowsProcessedStats, taxonomy::{Identified, ImportedEntity}};
use tracing::error;

/// Persists entity specifications and records `import id -> storage id` for
/// every entity that was stored, so later link rows can resolve it.
pub struct EntityBatchFn<R> {
    repository: R,
    model_id: String,
    label: String,
    import_ids: SharedImportIds,
    diagnostics: SharedDiagnostics,
}

impl<R: Repository> EntityBatchFn<R> {
    pub fn new(
        repository: R,
        model_id: impl Into<String>,
        label: impl Into<String>,
        import_ids: SharedImportIds,
        diagnostics: SharedDiagnostics,
    ) -> Self {
        Self {
            repository,
            model_id: model_id.into(),
            label: label.into(),
            import_ids,
            diagnostics,
        }
    }
}

#[async_trait]
impl<R> BatchFn<R::Spec> for EntityBatchFn<R>
where
    R: Repository,
    R::Entity: ImportedEntity,
{
    async fn process_batch(&self, specs: Vec<R::Spec>) -> RowsProcessedStats {
        let attempted = specs.len();
        let outcome = self.repository.create_many(&self.model_id, specs).await;
        let (stats, entities) = settle(&*self.diagnostics, &self.label, "entities", attempted, outcome);

        for entity in &entities {
            self.import_ids.insert(entity.import_id(), entity.id());
        }

        stats
    }
}

/// Persists relation specifications.
pub struct RelationBatchFn<R> {
    repository: R,
    model_id: String,
    label: String,
    diagnostics: SharedDiagnostics,
}

impl<R: Repository> RelationBatchFn<R> {
    pub fn new(
        repository: R,
        model_id: impl Into<String>,
        label: impl Into<String>,
        diagnostics: SharedDiagnostics,
    ) -> Self {
        Self {
            repository,
            model_id: model_id.into(),
            label: label.into(),
            diagnostics,
        }
    }
}

#[async_trait]
impl<R: Repository> BatchFn<R::Spec> for RelationBatchFn<R> {
    async fn process_batch(&self, specs: Vec<R::Spec>) -> RowsProcessedStats {
        let attempted = specs.len();
        let outcome = self.repository.create_many(&self.model_id, specs).await;
        settle(&*self.diagnostics, &self.label, "relations", attempted, outcome).0
    }
}

/// Persists hierarchy pair specifications.
pub struct HierarchyBatchFn<R> {
    repository: R,
    model_id: String,
    label: String,
    diagnostics: SharedDiagnostics,
}

impl<R: Repository> HierarchyBatchFn<R> {
    pub fn new(
        repository: R,
        model_id: impl Into<String>,
        label: impl Into<String>,
        diagnostics: SharedDiagnostics,
    ) -> Self {
        Self {
            repository,
            model_id: model_id.into(),
            label: label.into(),
            diagnostics,
        }
    }
}

#[async_trait]
impl<R: Repository> BatchFn<R::Spec> for HierarchyBatchFn<R> {
    async fn process_batch(&self, specs: Vec<R::Spec>) -> RowsProcessedStats {
        let attempted = specs.len();
        let outcome = self.repository.create_many(&self.model_id, specs).await;
        settle(&*self.diagnostics, &self.label, "hierarchy pairs", attempted, outcome).0
    }
}

/// Turns the outcome of one bulk write into batch stats, logging at most one
/// error and one warning.
///
/// These come on top of what the repository already reported. Through
/// [`SledRepository`](engine_core::repository::SledRepository) a failed bulk
/// write logs two errors per batch, one from `handle_bulk_write` and one here,
/// and a partial write logs two warnings.
fn settle<E>(
    diagnostics: &dyn Diagnostics,
    label: &str,
    noun: &str,
    attempted: usize,
    outcome: Result<Vec<E>, StoreError>,
) -> (RowsProcessedStats, Vec<E>) {
    let attempted_rows = attempted as u64;

    let mut stored = match outcome {
        Ok(stored) => stored,
        Err(e) => {
            diagnostics.log_error(
                &format!("Failed to persist a batch of {attempted} {label} {noun}"),
                Some(&e),
            );
            return (RowsProcessedStats::all_failed(attempted_rows), Vec::new());
        }
    };

    if stored.len() > attempted {
        error!(
            batch = label,
            attempted,
            returned = stored.len(),
            "Store returned more documents than were submitted"
        );
        debug_assert!(
            stored.len() <= attempted,
            "store returned {} {noun} for a batch of {attempted}",
            stored.len()
        );
        stored.truncate(attempted);
    }

    let success = stored.len() as u64;
    let failed = attempted_rows - success;
    if failed > 0 {
        diagnostics.log_warning(
            &format!("{label}: {failed} out of {attempted} {noun} in the batch could not be persisted"),
            None,
        );
    }

    (RowsProcessedStats::new(attempted_rows, success, failed), stored)
}
