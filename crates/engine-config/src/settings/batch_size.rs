use model::taxonomy::{ImportKind, KindFamily};
use serde::Serialize;

pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Batch size per family of import kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSizes {
    pub entities: usize,
    pub hierarchy: usize,
    pub relations: usize,
}

impl Default for BatchSizes {
    fn default() -> Self {
        Self::uniform(DEFAULT_BATCH_SIZE)
    }
}

impl BatchSizes {
    pub fn uniform(size: usize) -> Self {
        Self {
            entities: size,
            hierarchy: size,
            relations: size,
        }
    }

    pub fn for_kind(&self, kind: ImportKind) -> usize {
        match kind.family() {
            KindFamily::Entity => self.entities,
            KindFamily::Hierarchy => self.hierarchy,
            KindFamily::Relation => self.relations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_their_family_size() {
        let sizes = BatchSizes {
            entities: 10,
            hierarchy: 20,
            relations: 30,
        };
        assert_eq!(sizes.for_kind(ImportKind::Skills), 10);
        assert_eq!(sizes.for_kind(ImportKind::SkillHierarchy), 20);
        assert_eq!(sizes.for_kind(ImportKind::OccupationToSkillRelations), 30);
        assert_eq!(BatchSizes::default().for_kind(ImportKind::Occupations), 1000);
    }
}
