use crate::error::RunError;
use engine_core::{
    diagnostics::SharedDiagnostics,
    repository::SledRepository,
    store::{Document, SledStore},
};
use engine_processing::export::{ExportRow, export_csv};
use model::taxonomy::{
    ImportKind, Occupation, OccupationGroup, OccupationHierarchyPair,
    OccupationToSkillRelationPair, Skill, SkillGroup, SkillHierarchyPair, SkillToSkillRelationPair,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, BufWriter};
use tracing::info;

/// One exported file.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub kind: ImportKind,
    pub path: PathBuf,
    pub rows: u64,
}

/// Writes the stored taxonomy of a model back to CSV.
pub struct Exporter {
    store: SledStore,
    diagnostics: SharedDiagnostics,
}

impl Exporter {
    pub fn new(store: SledStore, diagnostics: SharedDiagnostics) -> Self {
        Self { store, diagnostics }
    }

    pub async fn export_kind<W>(&self, kind: ImportKind, model_id: &str, writer: W) -> Result<u64, RunError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        match kind {
            ImportKind::OccupationGroups => self.export::<OccupationGroup, _>(kind, model_id, writer).await,
            ImportKind::SkillGroups => self.export::<SkillGroup, _>(kind, model_id, writer).await,
            ImportKind::Skills => self.export::<Skill, _>(kind, model_id, writer).await,
            ImportKind::Occupations => self.export::<Occupation, _>(kind, model_id, writer).await,
            ImportKind::OccupationHierarchy => {
                self.export::<OccupationHierarchyPair, _>(kind, model_id, writer).await
            }
            ImportKind::SkillHierarchy => {
                self.export::<SkillHierarchyPair, _>(kind, model_id, writer).await
            }
            ImportKind::OccupationToSkillRelations => {
                self.export::<OccupationToSkillRelationPair, _>(kind, model_id, writer).await
            }
            ImportKind::SkillToSkillRelations => {
                self.export::<SkillToSkillRelationPair, _>(kind, model_id, writer).await
            }
        }
    }

    /// Export every kind into `<dir>/<kind>.csv`, creating `dir` if needed.
    pub async fn export_all(&self, model_id: &str, dir: &Path) -> Result<Vec<ExportSummary>, RunError> {
        tokio::fs::create_dir_all(dir).await.map_err(|source| RunError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut summaries = Vec::with_capacity(ImportKind::ALL.len());
        for kind in ImportKind::ALL {
            let path = dir.join(kind.file_name());
            let file = tokio::fs::File::create(&path).await.map_err(|source| RunError::Io {
                path: path.clone(),
                source,
            })?;

            let rows = self.export_kind(kind, model_id, BufWriter::new(file)).await?;
            info!(kind = %kind, path = %path.display(), rows, "Exported");
            summaries.push(ExportSummary { kind, path, rows });
        }

        Ok(summaries)
    }

    async fn export<D, W>(&self, kind: ImportKind, model_id: &str, writer: W) -> Result<u64, RunError>
    where
        D: Document + ExportRow,
        W: AsyncWrite + Unpin + Send,
    {
        let repository = SledRepository::<D>::new(&self.store, self.diagnostics.clone())?;
        export_csv(&repository, model_id, writer)
            .await
            .map_err(|error| RunError::Export { kind, error })
    }
}
