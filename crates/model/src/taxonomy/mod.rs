pub mod enums;
pub mod hierarchy;
pub mod kind;
pub mod object_ref;
pub mod occupation;
pub mod occupation_group;
pub mod relation;
pub mod skill;
pub mod skill_group;

pub use enums::{
    ObjectType, OccupationGroupType, OccupationType, ParseEnumError, RelationType, ReuseLevel,
    SkillType,
};
pub use hierarchy::{
    HierarchyPair, NewOccupationHierarchyPairSpec, NewSkillHierarchyPairSpec, OccupationHierarchyPair,
    SkillHierarchyPair,
};
pub use kind::{ImportKind, KindFamily};
pub use object_ref::ObjectRef;
pub use occupation::{NewOccupationSpec, Occupation};
pub use occupation_group::{NewOccupationGroupSpec, OccupationGroup};
pub use relation::{
    NewOccupationToSkillRelationPairSpec, NewSkillToSkillRelationPairSpec,
    OccupationToSkillRelationPair, SkillToSkillRelationPair,
};
pub use skill::{NewSkillSpec, Skill};
pub use skill_group::{NewSkillGroupSpec, SkillGroup};

/// Anything persisted in the store under a model.
pub trait Identified {
    /// Storage-assigned identifier.
    fn id(&self) -> &str;
    fn model_id(&self) -> &str;
}

/// A top-level taxonomy entity that relation rows can reference by the
/// natural key it was imported with.
pub trait ImportedEntity: Identified {
    fn import_id(&self) -> &str;
}

/// Mints a UUID for a newly created entity and prepends it to the history
/// carried over from the source. Returns `(uuid, history)`.
pub(crate) fn new_uuid_history(previous: Vec<String>) -> (String, Vec<String>) {
    let uuid = uuid::Uuid::new_v4().to_string();
    let mut history = Vec::with_capacity(previous.len() + 1);
    history.push(uuid.clone());
    history.extend(previous);
    (uuid, history)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uuid_leads_the_history() {
        let (uuid, history) = new_uuid_history(vec!["older".to_string()]);
        assert_eq!(history, vec![uuid, "older".to_string()]);
    }
}
