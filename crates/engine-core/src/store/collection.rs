use crate::{
    error::{BulkWriteError, StoreError},
    store::Document,
};
use futures::stream::{self, BoxStream, StreamExt};
use model::taxonomy::Identified;
use std::marker::PhantomData;
use tracing::debug;

/// Typed view over the sled trees holding one document kind.
///
/// Documents are keyed `<model_id>\0<id>`, where `id` is a fixed-width hex
/// rendering of a monotonic sled id, so a prefix scan yields documents in
/// insertion order.
pub struct Collection<D> {
    db: sled::Db,
    docs: sled::Tree,
    unique: sled::Tree,
    _doc: PhantomData<fn() -> D>,
}

impl<D> Clone for Collection<D> {
    fn clone(&self) -> Self {
        Collection {
            db: self.db.clone(),
            docs: self.docs.clone(),
            unique: self.unique.clone(),
            _doc: PhantomData,
        }
    }
}

fn model_prefix(model_id: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(model_id.len() + 1);
    key.extend_from_slice(model_id.as_bytes());
    key.push(0);
    key
}

fn scoped_key(model_id: &str, suffix: &str) -> Vec<u8> {
    let mut key = model_prefix(model_id);
    key.extend_from_slice(suffix.as_bytes());
    key
}

impl<D: Document> Collection<D> {
    pub(crate) fn open(db: &sled::Db) -> Result<Self, StoreError> {
        let docs = db.open_tree(D::COLLECTION)?;
        let unique = db.open_tree(format!("{}:unique", D::COLLECTION))?;
        Ok(Collection {
            db: db.clone(),
            docs,
            unique,
            _doc: PhantomData,
        })
    }

    /// Insert every spec, continuing past unique-key violations.
    ///
    /// When at least one spec is rejected as a duplicate, or a storage error
    /// interrupts the write after some documents were persisted, the error is
    /// [`BulkWriteError::Partial`] and carries the persisted documents.
    pub fn insert_many(&self, specs: Vec<D::Spec>) -> Result<Vec<D>, BulkWriteError<D>> {
        let attempted = specs.len();
        let mut inserted = Vec::with_capacity(attempted);
        let mut first_duplicate = None;

        for spec in specs {
            match self.insert_one(spec) {
                Ok(doc) => inserted.push(doc),
                Err(err @ StoreError::DuplicateKey { .. }) => {
                    debug!(collection = D::COLLECTION, error = %err, "Skipping duplicate document");
                    first_duplicate.get_or_insert(err);
                }
                Err(err) if inserted.is_empty() => return Err(BulkWriteError::Failed(err)),
                Err(err) => {
                    return Err(BulkWriteError::Partial {
                        inserted,
                        attempted,
                        source: err,
                    });
                }
            }
        }

        match first_duplicate {
            Some(source) => Err(BulkWriteError::Partial {
                inserted,
                attempted,
                source,
            }),
            None => Ok(inserted),
        }
    }

    fn insert_one(&self, spec: D::Spec) -> Result<D, StoreError> {
        let id = format!("{:016x}", self.db.generate_id()?);
        let doc = D::create(id, spec);

        let unique_key = doc.unique_key().map(|k| scoped_key(doc.model_id(), &k));
        if let Some(ref key) = unique_key {
            let claimed = self.unique.compare_and_swap(
                key.as_slice(),
                None::<&[u8]>,
                Some(doc.id().as_bytes()),
            )?;
            if claimed.is_err() {
                return Err(StoreError::DuplicateKey {
                    collection: D::COLLECTION,
                    key: doc.unique_key().unwrap_or_default(),
                });
            }
        }

        let write = bincode::serialize(&doc)
            .map_err(StoreError::from)
            .and_then(|bytes| {
                self.docs
                    .insert(scoped_key(doc.model_id(), doc.id()), bytes)
                    .map_err(StoreError::from)
            });

        if let Err(err) = write {
            // Release the claimed unique key.
            if let Some(key) = unique_key {
                self.unique.remove(key)?;
            }
            return Err(err);
        }

        Ok(doc)
    }

    pub fn get(&self, model_id: &str, id: &str) -> Result<Option<D>, StoreError> {
        match self.docs.get(scoped_key(model_id, id))? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Stream every document of `model_id` in insertion order.
    pub fn find_all(&self, model_id: &str) -> BoxStream<'static, Result<D, StoreError>> {
        let iter = self.docs.scan_prefix(model_prefix(model_id));
        stream::iter(iter)
            .map(|item| -> Result<D, StoreError> {
                let (_key, bytes) = item?;
                Ok(bincode::deserialize(&bytes)?)
            })
            .boxed()
    }

    pub fn count(&self, model_id: &str) -> usize {
        self.docs.scan_prefix(model_prefix(model_id)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SledStore;
    use futures::TryStreamExt;
    use model::taxonomy::{NewOccupationGroupSpec, OccupationGroup, OccupationGroupType};

    fn group(model: &str, code: &str) -> NewOccupationGroupSpec {
        NewOccupationGroupSpec {
            model_id: model.to_string(),
            import_id: format!("imp-{code}"),
            origin_uri: String::new(),
            uuid_history: vec![],
            code: code.to_string(),
            group_type: OccupationGroupType::IscoGroup,
            preferred_label: format!("Group {code}"),
            alt_labels: vec![],
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn find_all_returns_documents_in_insertion_order() {
        let store = SledStore::temporary().unwrap();
        let coll = store.collection::<OccupationGroup>().unwrap();
        coll.insert_many(vec![group("m1", "2"), group("m1", "1"), group("m2", "3")])
            .unwrap();

        let docs: Vec<OccupationGroup> = coll.find_all("m1").try_collect().await.unwrap();
        let codes: Vec<_> = docs.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["2", "1"]);
        assert_eq!(coll.count("m2"), 1);
    }

    #[test]
    fn duplicates_yield_partial_with_persisted_documents() {
        let store = SledStore::temporary().unwrap();
        let coll = store.collection::<OccupationGroup>().unwrap();

        let err = coll
            .insert_many(vec![group("m1", "1"), group("m1", "1"), group("m1", "2")])
            .unwrap_err();

        match err {
            BulkWriteError::Partial {
                inserted,
                attempted,
                source,
            } => {
                assert_eq!(attempted, 3);
                assert_eq!(inserted.len(), 2);
                assert!(matches!(source, StoreError::DuplicateKey { .. }));
            }
            other => panic!("expected partial failure, got {other:?}"),
        }
        assert_eq!(coll.count("m1"), 2);
    }

    #[test]
    fn unique_keys_are_scoped_per_model() {
        let store = SledStore::temporary().unwrap();
        let coll = store.collection::<OccupationGroup>().unwrap();
        let docs = coll
            .insert_many(vec![group("m1", "1"), group("m2", "1")])
            .unwrap();
        assert_eq!(docs.len(), 2);
        assert!(coll.get("m1", &docs[0].id).unwrap().is_some());
        assert!(coll.get("m2", &docs[0].id).unwrap().is_none());
    }
}
