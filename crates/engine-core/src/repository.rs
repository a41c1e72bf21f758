use crate::{
    diagnostics::SharedDiagnostics,
    error::StoreError,
    store::{Collection, Document, PopulateFn, SledStore, handle_bulk_write},
};
use async_trait::async_trait;
use futures::stream::BoxStream;
use model::taxonomy::Identified;
use tracing::warn;

/// Storage contract for one entity or relation kind.
#[async_trait]
pub trait Repository: Send + Sync {
    type Spec: Send + 'static;
    type Entity: Send + 'static;

    /// Persist `specs` under `model_id` in one bulk write and return the
    /// entities that were actually stored. Fewer entities than specs means
    /// some rows were lost; which ones is not reported.
    async fn create_many(
        &self,
        model_id: &str,
        specs: Vec<Self::Spec>,
    ) -> Result<Vec<Self::Entity>, StoreError>;

    /// Stream every entity of `model_id`.
    fn find_all(&self, model_id: &str) -> BoxStream<'static, Result<Self::Entity, StoreError>>;
}

/// [`Repository`] over a sled-backed [`Collection`].
pub struct SledRepository<D> {
    store: SledStore,
    collection: Collection<D>,
    diagnostics: SharedDiagnostics,
    populate: bool,
}

impl<D: Document> SledRepository<D> {
    pub fn new(store: &SledStore, diagnostics: SharedDiagnostics) -> Result<Self, StoreError> {
        Ok(Self {
            collection: store.collection::<D>()?,
            store: store.clone(),
            diagnostics,
            populate: false,
        })
    }

    /// Populate references on every document returned from `create_many`.
    pub fn with_population(mut self) -> Self {
        self.populate = true;
        self
    }

    /// Drop specs referencing an entity that is missing from the model or is
    /// stored under a different type than the spec declares.
    fn retain_resolvable(
        &self,
        model_id: &str,
        specs: Vec<D::Spec>,
    ) -> Result<Vec<D::Spec>, StoreError> {
        let mut kept = Vec::with_capacity(specs.len());
        let mut dangling = 0;
        for spec in specs {
            let mut resolved = true;
            for (object_type, id) in D::endpoints(&spec) {
                if self.store.resolve_ref(object_type, model_id, id)?.is_none() {
                    resolved = false;
                    break;
                }
            }
            if resolved {
                kept.push(spec);
            } else {
                dangling += 1;
            }
        }

        if dangling > 0 {
            self.diagnostics.log_warning(
                &format!(
                    "{}: {dangling} specifications reference entities that do not exist with the declared type and were skipped",
                    D::COLLECTION
                ),
                None,
            );
        }
        Ok(kept)
    }

    fn populate_doc(&self, mut doc: D) -> D {
        if let Err(e) = doc.populate(&self.store) {
            warn!(
                collection = D::COLLECTION,
                id = doc.id(),
                error = %e,
                "Failed to populate document references"
            );
        }
        doc
    }
}

#[async_trait]
impl<D: Document> Repository for SledRepository<D> {
    type Spec = D::Spec;
    type Entity = D;

    async fn create_many(&self, model_id: &str, specs: Vec<D::Spec>) -> Result<Vec<D>, StoreError> {
        let attempted = specs.len();
        let (specs, foreign): (Vec<_>, Vec<_>) = specs
            .into_iter()
            .partition(|spec| D::spec_model_id(spec) == model_id);

        if !foreign.is_empty() {
            self.diagnostics.log_warning(
                &format!(
                    "{}: {} specifications do not belong to model '{model_id}' and were skipped",
                    D::COLLECTION,
                    foreign.len()
                ),
                None,
            );
        }

        let specs = self.retain_resolvable(model_id, specs)?;
        let outcome = self.collection.insert_many(specs);
        let populate: PopulateFn<'_, D> = &|doc| self.populate_doc(doc);

        handle_bulk_write(
            outcome,
            attempted,
            self.populate.then_some(populate),
            &*self.diagnostics,
            D::COLLECTION,
        )
    }

    fn find_all(&self, model_id: &str) -> BoxStream<'static, Result<D, StoreError>> {
        self.collection.find_all(model_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Diagnostics, MemoryDiagnostics};
    use futures::TryStreamExt;
    use model::taxonomy::{
        NewOccupationGroupSpec, NewOccupationHierarchyPairSpec, NewOccupationSpec, ObjectType,
        Occupation, OccupationGroup, OccupationGroupType, OccupationHierarchyPair, OccupationType,
    };
    use std::sync::Arc;

    fn group_spec(model: &str, code: &str) -> NewOccupationGroupSpec {
        NewOccupationGroupSpec {
            model_id: model.into(),
            import_id: format!("g{code}"),
            origin_uri: String::new(),
            uuid_history: vec![],
            code: code.into(),
            group_type: OccupationGroupType::IscoGroup,
            preferred_label: format!("Group {code}"),
            alt_labels: vec![],
            description: String::new(),
        }
    }

    fn occupation_spec(model: &str, code: &str) -> NewOccupationSpec {
        NewOccupationSpec {
            model_id: model.into(),
            import_id: format!("o{code}"),
            origin_uri: String::new(),
            uuid_history: vec![],
            occupation_group_code: "1".into(),
            code: code.into(),
            preferred_label: format!("Occupation {code}"),
            alt_labels: vec![],
            description: String::new(),
            definition: String::new(),
            scope_note: String::new(),
            regulated_profession_note: String::new(),
            occupation_type: OccupationType::Esco,
            is_localized: false,
        }
    }

    #[tokio::test]
    async fn create_many_skips_specs_of_other_models() {
        let store = SledStore::temporary().unwrap();
        let diag = MemoryDiagnostics::shared();
        let repo = SledRepository::<OccupationGroup>::new(&store, diag.clone()).unwrap();

        let created = repo
            .create_many("m1", vec![group_spec("m1", "1"), group_spec("m2", "2")])
            .await
            .unwrap();

        assert_eq!(created.len(), 1);
        assert_eq!(diag.warning_count(), 1);
        let all: Vec<_> = repo.find_all("m1").try_collect().await.unwrap();
        assert_eq!(all, created);
    }

    #[tokio::test]
    async fn relation_documents_are_populated() {
        let store = SledStore::temporary().unwrap();
        let diag: SharedDiagnostics = Arc::new(MemoryDiagnostics::new());
        let groups = SledRepository::<OccupationGroup>::new(&store, diag.clone()).unwrap();
        let occupations = SledRepository::<Occupation>::new(&store, diag.clone()).unwrap();
        let hierarchy = SledRepository::<OccupationHierarchyPair>::new(&store, diag.clone())
            .unwrap()
            .with_population();

        let group = groups
            .create_many("m1", vec![group_spec("m1", "1")])
            .await
            .unwrap()
            .remove(0);
        let occupation = occupations
            .create_many("m1", vec![occupation_spec("m1", "1.1")])
            .await
            .unwrap()
            .remove(0);

        let pairs = hierarchy
            .create_many(
                "m1",
                vec![NewOccupationHierarchyPairSpec {
                    model_id: "m1".into(),
                    parent_type: ObjectType::IscoGroup,
                    parent_id: group.id.clone(),
                    child_type: ObjectType::EscoOccupation,
                    child_id: occupation.id.clone(),
                }],
            )
            .await
            .unwrap();

        let parent = pairs[0].parent.as_ref().unwrap();
        assert_eq!(parent.id, group.id);
        assert_eq!(parent.code.as_deref(), Some("1"));
        assert_eq!(
            pairs[0].child.as_ref().unwrap().preferred_label,
            "Occupation 1.1"
        );
    }

    #[tokio::test]
    async fn links_to_entities_of_another_type_are_skipped() {
        let store = SledStore::temporary().unwrap();
        let diag = MemoryDiagnostics::shared();
        let groups = SledRepository::<OccupationGroup>::new(&store, diag.clone()).unwrap();
        let hierarchy = SledRepository::<OccupationHierarchyPair>::new(&store, diag.clone())
            .unwrap()
            .with_population();

        let created = groups
            .create_many("m1", vec![group_spec("m1", "1"), group_spec("m1", "2")])
            .await
            .unwrap();
        let pair = |child_type| NewOccupationHierarchyPairSpec {
            model_id: "m1".into(),
            parent_type: ObjectType::IscoGroup,
            parent_id: created[0].id.clone(),
            child_type,
            child_id: created[1].id.clone(),
        };

        // The child is an ISCO group, not an occupation.
        let pairs = hierarchy
            .create_many(
                "m1",
                vec![pair(ObjectType::EscoOccupation), pair(ObjectType::IscoGroup)],
            )
            .await
            .unwrap();

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].child.as_ref().unwrap().code.as_deref(), Some("2"));
        assert_eq!(diag.warning_count(), 1);
        assert!(diag.warnings()[0].contains("1 specifications reference entities"));
        let all: Vec<_> = hierarchy.find_all("m1").try_collect().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_codes_are_recovered_as_partial_success() {
        let store = SledStore::temporary().unwrap();
        let diag = MemoryDiagnostics::shared();
        let repo = SledRepository::<OccupationGroup>::new(&store, diag.clone()).unwrap();

        let created = repo
            .create_many(
                "m1",
                vec![
                    group_spec("m1", "1"),
                    group_spec("m1", "1"),
                    group_spec("m1", "2"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(
            diag.warnings(),
            vec!["occupation_groups: 2 out of 3 documents were inserted successfully"]
        );
    }
}
