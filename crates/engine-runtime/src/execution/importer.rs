//! Two-phase taxonomy import.
//!
//! Entities must be stored before any hierarchy or relation row can resolve
//! its endpoints, so the import is a typestate: [`TaxonomyImport`] starts in
//! [`ImportingEntities`] and only [`TaxonomyImport::into_relations`] unlocks
//! the link imports.

use crate::{
    error::RunError,
    report::{FileReport, ImportReport},
};
use connectors::{http::Downloader, source::CsvSource};
use engine_config::{BatchSizes, ValidatedImportSettings};
use engine_core::{
    diagnostics::{Diagnostics, SharedDiagnostics},
    metrics::Metrics,
    repository::SledRepository,
    store::{Document, SledStore},
};
use engine_processing::{
    batch::{
        BatchFn, BatchProcessor, BatchRowProcessor, EntityBatchFn, HierarchyBatchFn,
        RelationBatchFn, RowProcessor,
    },
    error::ImportError,
    stream::process_source,
    transform::{
        OccupationGroupTransform, OccupationHierarchyTransform, OccupationToSkillRelationTransform,
        OccupationTransform, RowTransform, SkillGroupTransform, SkillHierarchyTransform,
        SkillToSkillRelationTransform, SkillTransform, TransformContext,
    },
};
use model::{
    import_id::SharedImportIds,
    stats::RowsProcessedStats,
    taxonomy::{
        ImportKind, Occupation, OccupationGroup, OccupationHierarchyPair,
        OccupationToSkillRelationPair, Skill, SkillGroup, SkillHierarchyPair,
        SkillToSkillRelationPair,
    },
};
use std::{marker::PhantomData, time::Instant};
use tracing::{error, info};

/// Phase marker: entity files may be imported.
#[derive(Debug)]
pub struct ImportingEntities;

/// Phase marker: hierarchy and relation files may be imported.
#[derive(Debug)]
pub struct ImportingRelations;

/// State shared by both phases of a run.
struct ImportContext {
    store: SledStore,
    model_id: String,
    diagnostics: SharedDiagnostics,
    import_ids: SharedImportIds,
    batch_sizes: BatchSizes,
    downloader: Downloader,
    metrics: Metrics,
    report: ImportReport,
}

pub struct TaxonomyImport<Phase> {
    ctx: ImportContext,
    _phase: PhantomData<Phase>,
}

impl TaxonomyImport<ImportingEntities> {
    pub fn new(store: SledStore, model_id: impl Into<String>, diagnostics: SharedDiagnostics) -> Self {
        let model_id = model_id.into();
        Self {
            ctx: ImportContext {
                store,
                report: ImportReport::new(model_id.clone()),
                model_id,
                diagnostics,
                import_ids: SharedImportIds::new(),
                batch_sizes: BatchSizes::default(),
                downloader: Downloader::new(),
                metrics: Metrics::new(),
            },
            _phase: PhantomData,
        }
    }

    pub fn with_batch_sizes(mut self, batch_sizes: BatchSizes) -> Self {
        self.ctx.batch_sizes = batch_sizes;
        self
    }

    pub fn with_downloader(mut self, downloader: Downloader) -> Self {
        self.ctx.downloader = downloader;
        self
    }

    pub async fn import_occupation_groups(
        &mut self,
        source: &CsvSource,
    ) -> Result<RowsProcessedStats, RunError> {
        let transform = OccupationGroupTransform::new(self.ctx.transform_context());
        let batch_fn = self.ctx.entity_batch_fn::<OccupationGroup>(ImportKind::OccupationGroups)?;
        self.ctx
            .import_file(ImportKind::OccupationGroups, source, transform, batch_fn)
            .await
    }

    pub async fn import_skill_groups(&mut self, source: &CsvSource) -> Result<RowsProcessedStats, RunError> {
        let transform = SkillGroupTransform::new(self.ctx.transform_context());
        let batch_fn = self.ctx.entity_batch_fn::<SkillGroup>(ImportKind::SkillGroups)?;
        self.ctx
            .import_file(ImportKind::SkillGroups, source, transform, batch_fn)
            .await
    }

    pub async fn import_skills(&mut self, source: &CsvSource) -> Result<RowsProcessedStats, RunError> {
        let transform = SkillTransform::new(self.ctx.transform_context());
        let batch_fn = self.ctx.entity_batch_fn::<Skill>(ImportKind::Skills)?;
        self.ctx
            .import_file(ImportKind::Skills, source, transform, batch_fn)
            .await
    }

    pub async fn import_occupations(&mut self, source: &CsvSource) -> Result<RowsProcessedStats, RunError> {
        let transform = OccupationTransform::new(self.ctx.transform_context());
        let batch_fn = self.ctx.entity_batch_fn::<Occupation>(ImportKind::Occupations)?;
        self.ctx
            .import_file(ImportKind::Occupations, source, transform, batch_fn)
            .await
    }

    /// Import an entity file chosen at runtime, e.g. from a manifest.
    pub async fn import_entity(
        &mut self,
        kind: ImportKind,
        source: &CsvSource,
    ) -> Result<RowsProcessedStats, RunError> {
        match kind {
            ImportKind::OccupationGroups => self.import_occupation_groups(source).await,
            ImportKind::SkillGroups => self.import_skill_groups(source).await,
            ImportKind::Skills => self.import_skills(source).await,
            ImportKind::Occupations => self.import_occupations(source).await,
            _ => Err(RunError::WrongPhase {
                kind,
                phase: "importing entities",
            }),
        }
    }

    /// Close the entity phase. Every entity imported so far is resolvable by
    /// the link imports that follow.
    pub fn into_relations(self) -> TaxonomyImport<ImportingRelations> {
        info!(
            model_id = %self.ctx.model_id,
            mapped_ids = self.ctx.import_ids.len(),
            "Entity phase finished"
        );
        TaxonomyImport {
            ctx: self.ctx,
            _phase: PhantomData,
        }
    }
}

impl TaxonomyImport<ImportingRelations> {
    pub async fn import_occupation_hierarchy(
        &mut self,
        source: &CsvSource,
    ) -> Result<RowsProcessedStats, RunError> {
        let kind = ImportKind::OccupationHierarchy;
        let transform =
            OccupationHierarchyTransform::new(self.ctx.transform_context(), self.ctx.import_ids.clone());
        let batch_fn = HierarchyBatchFn::new(
            self.ctx.link_repository::<OccupationHierarchyPair>()?,
            self.ctx.model_id.clone(),
            kind.as_str(),
            self.ctx.diagnostics.clone(),
        );
        self.ctx.import_file(kind, source, transform, batch_fn).await
    }

    pub async fn import_skill_hierarchy(
        &mut self,
        source: &CsvSource,
    ) -> Result<RowsProcessedStats, RunError> {
        let kind = ImportKind::SkillHierarchy;
        let transform =
            SkillHierarchyTransform::new(self.ctx.transform_context(), self.ctx.import_ids.clone());
        let batch_fn = HierarchyBatchFn::new(
            self.ctx.link_repository::<SkillHierarchyPair>()?,
            self.ctx.model_id.clone(),
            kind.as_str(),
            self.ctx.diagnostics.clone(),
        );
        self.ctx.import_file(kind, source, transform, batch_fn).await
    }

    pub async fn import_occupation_to_skill_relations(
        &mut self,
        source: &CsvSource,
    ) -> Result<RowsProcessedStats, RunError> {
        let kind = ImportKind::OccupationToSkillRelations;
        let transform = OccupationToSkillRelationTransform::new(
            self.ctx.transform_context(),
            self.ctx.import_ids.clone(),
        );
        let batch_fn = RelationBatchFn::new(
            self.ctx.link_repository::<OccupationToSkillRelationPair>()?,
            self.ctx.model_id.clone(),
            kind.as_str(),
            self.ctx.diagnostics.clone(),
        );
        self.ctx.import_file(kind, source, transform, batch_fn).await
    }

    pub async fn import_skill_to_skill_relations(
        &mut self,
        source: &CsvSource,
    ) -> Result<RowsProcessedStats, RunError> {
        let kind = ImportKind::SkillToSkillRelations;
        let transform =
            SkillToSkillRelationTransform::new(self.ctx.transform_context(), self.ctx.import_ids.clone());
        let batch_fn = RelationBatchFn::new(
            self.ctx.link_repository::<SkillToSkillRelationPair>()?,
            self.ctx.model_id.clone(),
            kind.as_str(),
            self.ctx.diagnostics.clone(),
        );
        self.ctx.import_file(kind, source, transform, batch_fn).await
    }

    /// Import a hierarchy or relation file chosen at runtime.
    pub async fn import_link(
        &mut self,
        kind: ImportKind,
        source: &CsvSource,
    ) -> Result<RowsProcessedStats, RunError> {
        match kind {
            ImportKind::OccupationHierarchy => self.import_occupation_hierarchy(source).await,
            ImportKind::SkillHierarchy => self.import_skill_hierarchy(source).await,
            ImportKind::OccupationToSkillRelations => {
                self.import_occupation_to_skill_relations(source).await
            }
            ImportKind::SkillToSkillRelations => self.import_skill_to_skill_relations(source).await,
            _ => Err(RunError::WrongPhase {
                kind,
                phase: "importing relations",
            }),
        }
    }

    /// Flush the store and close the run.
    pub fn finish(self) -> Result<ImportReport, RunError> {
        let ImportContext {
            store,
            diagnostics,
            metrics,
            mut report,
            ..
        } = self.ctx;

        store.flush()?;

        report.finished_at = Some(chrono::Utc::now());
        report.errors = diagnostics.error_count();
        report.warnings = diagnostics.warning_count();
        report.metrics = metrics.snapshot();

        info!(
            run_id = %report.run_id,
            files = report.files.len(),
            rows = report.totals.rows_processed,
            success = report.totals.rows_success,
            failed = report.totals.rows_failed,
            errors = report.errors,
            warnings = report.warnings,
            "Import finished"
        );
        Ok(report)
    }
}

impl<Phase> TaxonomyImport<Phase> {
    pub fn model_id(&self) -> &str {
        &self.ctx.model_id
    }

    pub fn import_ids(&self) -> &SharedImportIds {
        &self.ctx.import_ids
    }

    /// Files imported so far.
    pub fn report(&self) -> &ImportReport {
        &self.ctx.report
    }
}

impl ImportContext {
    fn transform_context(&self) -> TransformContext {
        TransformContext::new(self.model_id.clone(), self.diagnostics.clone())
    }

    fn entity_batch_fn<D: Document>(
        &self,
        kind: ImportKind,
    ) -> Result<EntityBatchFn<SledRepository<D>>, RunError> {
        Ok(EntityBatchFn::new(
            SledRepository::<D>::new(&self.store, self.diagnostics.clone())?,
            self.model_id.clone(),
            kind.as_str(),
            self.import_ids.clone(),
            self.diagnostics.clone(),
        ))
    }

    fn link_repository<D: Document>(&self) -> Result<SledRepository<D>, RunError> {
        Ok(SledRepository::<D>::new(&self.store, self.diagnostics.clone())?.with_population())
    }

    /// Stream one source through `transform` and `batch_fn`, recording a
    /// [`FileReport`] whether or not the file succeeds.
    async fn import_file<T, F>(
        &mut self,
        kind: ImportKind,
        source: &CsvSource,
        transform: T,
        batch_fn: F,
    ) -> Result<RowsProcessedStats, RunError>
    where
        T: RowTransform,
        F: BatchFn<T::Spec>,
    {
        let batch = BatchProcessor::new(kind.as_str(), self.batch_sizes.for_kind(kind), batch_fn)?
            .with_metrics(self.metrics.clone());
        let mut processor = BatchRowProcessor::new(transform, batch, self.diagnostics.clone());

        let errors_before = self.diagnostics.error_count();
        let warnings_before = self.diagnostics.warning_count();
        let start = Instant::now();
        info!(kind = %kind, source = %source, "Importing file");

        let result = process_source(source, &self.downloader, &mut processor).await;

        let (stats, failure) = match &result {
            Ok(stats) => (*stats, None),
            Err(ImportError::Stream { stats, source: cause }) => (*stats, Some(cause.to_string())),
            Err(e) => (
                RowsProcessedStats::all_failed(processor.rows_seen()),
                Some(e.to_string()),
            ),
        };
        if let Some(reason) = &failure {
            error!(kind = %kind, source = %source, reason = %reason, "File import failed");
        }

        self.report.push(FileReport {
            kind,
            source: source.to_string(),
            stats,
            errors: self.diagnostics.error_count() - errors_before,
            warnings: self.diagnostics.warning_count() - warnings_before,
            duration_ms: start.elapsed().as_millis() as u64,
            failure,
        });

        result.map_err(|error| RunError::Import {
            kind,
            source_name: source.to_string(),
            error,
        })
    }
}

/// Import every source of a validated manifest: all entity files first, then
/// all link files. Stops at the first file that fails as a whole.
pub async fn run_manifest(
    settings: &ValidatedImportSettings,
    diagnostics: SharedDiagnostics,
) -> Result<ImportReport, RunError> {
    let store = SledStore::open(&settings.store_path)?;
    run_manifest_with_store(settings, store, diagnostics).await
}

pub async fn run_manifest_with_store(
    settings: &ValidatedImportSettings,
    store: SledStore,
    diagnostics: SharedDiagnostics,
) -> Result<ImportReport, RunError> {
    info!(
        model_id = %settings.model_id,
        sources = settings.sources.len(),
        "Starting taxonomy import"
    );

    let mut import = TaxonomyImport::new(store, settings.model_id.clone(), diagnostics)
        .with_batch_sizes(settings.batch_sizes);

    for (kind, source) in settings.entity_sources() {
        import.import_entity(*kind, source).await?;
    }

    let mut import = import.into_relations();
    for (kind, source) in settings.link_sources() {
        import.import_link(*kind, source).await?;
    }

    import.finish()
}
