mod bulk;
mod collection;
mod document;

pub use bulk::{PopulateFn, handle_bulk_write};
pub use collection::Collection;
pub use document::Document;

use crate::error::StoreError;
use model::taxonomy::{ObjectRef, ObjectType, Occupation, OccupationGroup, Skill, SkillGroup};
use std::path::Path;

/// Persistent taxonomy store backed by sled. One tree per collection plus one
/// unique-index tree per collection that declares a unique key.
#[derive(Clone)]
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// In-memory store that is discarded on drop.
    pub fn temporary() -> Result<Self, StoreError> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    pub fn collection<D: Document>(&self) -> Result<Collection<D>, StoreError> {
        Collection::open(&self.db)
    }

    /// Look up the entity `id` of `object_type` and summarize it.
    ///
    /// Returns `None` when no such entity exists in the model, or when the
    /// stored entity's actual type differs from `object_type`.
    pub fn resolve_ref(
        &self,
        object_type: ObjectType,
        model_id: &str,
        id: &str,
    ) -> Result<Option<ObjectRef>, StoreError> {
        let found = match object_type {
            ObjectType::IscoGroup | ObjectType::LocalGroup => self
                .collection::<OccupationGroup>()?
                .get(model_id, id)?
                .map(|g| ObjectRef {
                    object_type: g.group_type.into(),
                    code: Some(g.code),
                    preferred_label: g.preferred_label,
                    id: g.id,
                }),
            ObjectType::EscoOccupation | ObjectType::LocalOccupation => self
                .collection::<Occupation>()?
                .get(model_id, id)?
                .map(|o| ObjectRef {
                    object_type: o.occupation_type.into(),
                    code: Some(o.code),
                    preferred_label: o.preferred_label,
                    id: o.id,
                }),
            ObjectType::SkillGroup => {
                self.collection::<SkillGroup>()?
                    .get(model_id, id)?
                    .map(|g| ObjectRef {
                        object_type: ObjectType::SkillGroup,
                        code: Some(g.code),
                        preferred_label: g.preferred_label,
                        id: g.id,
                    })
            }
            ObjectType::Skill => self
                .collection::<Skill>()?
                .get(model_id, id)?
                .map(|s| ObjectRef {
                    object_type: ObjectType::Skill,
                    code: None,
                    preferred_label: s.preferred_label,
                    id: s.id,
                }),
        };

        Ok(found.filter(|r| r.object_type == object_type))
    }

    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for SledStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledStore")
            .field("trees", &self.db.tree_names().len())
            .finish()
    }
}
