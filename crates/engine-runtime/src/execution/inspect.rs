use crate::error::RunError;
use engine_core::store::{Document, SledStore};
use model::taxonomy::{
    ImportKind, Occupation, OccupationGroup, OccupationHierarchyPair,
    OccupationToSkillRelationPair, Skill, SkillGroup, SkillHierarchyPair, SkillToSkillRelationPair,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindCount {
    pub kind: ImportKind,
    pub documents: usize,
}

/// Number of stored documents of every kind for `model_id`.
pub fn count_documents(store: &SledStore, model_id: &str) -> Result<Vec<KindCount>, RunError> {
    fn count<D: Document>(store: &SledStore, model_id: &str) -> Result<usize, RunError> {
        Ok(store.collection::<D>()?.count(model_id))
    }

    ImportKind::ALL
        .into_iter()
        .map(|kind| -> Result<KindCount, RunError> {
            let documents = match kind {
                ImportKind::OccupationGroups => count::<OccupationGroup>(store, model_id)?,
                ImportKind::SkillGroups => count::<SkillGroup>(store, model_id)?,
                ImportKind::Skills => count::<Skill>(store, model_id)?,
                ImportKind::Occupations => count::<Occupation>(store, model_id)?,
                ImportKind::OccupationHierarchy => count::<OccupationHierarchyPair>(store, model_id)?,
                ImportKind::SkillHierarchy => count::<SkillHierarchyPair>(store, model_id)?,
                ImportKind::OccupationToSkillRelations => {
                    count::<OccupationToSkillRelationPair>(store, model_id)?
                }
                ImportKind::SkillToSkillRelations => count::<SkillToSkillRelationPair>(store, model_id)?,
            };
            Ok(KindCount { kind, documents })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_counts_zero_everywhere() {
        let store = SledStore::temporary().unwrap();
        let counts = count_documents(&store, "m").unwrap();
        assert_eq!(counts.len(), 8);
        assert!(counts.iter().all(|c| c.documents == 0));
    }
}
