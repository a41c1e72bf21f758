use crate::{error::StoreError, store::SledStore};
use model::taxonomy::{
    Identified, NewOccupationGroupSpec, NewOccupationHierarchyPairSpec,
    NewOccupationSpec, NewOccupationToSkillRelationPairSpec, NewSkillGroupSpec,
    NewSkillHierarchyPairSpec, NewSkillSpec, NewSkillToSkillRelationPairSpec, ObjectType,
    Occupation, OccupationGroup, OccupationHierarchyPair, OccupationToSkillRelationPair, Skill,
    SkillGroup, SkillHierarchyPair, SkillToSkillRelationPair,
};
use serde::{Serialize, de::DeserializeOwned};

/// A taxonomy record that can be stored in a [`Collection`](super::Collection).
pub trait Document:
    Identified + Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    /// The validated specification a document is created from.
    type Spec: Send + 'static;

    const COLLECTION: &'static str;

    /// Materialize a document from its specification under a fresh storage id.
    fn create(id: String, spec: Self::Spec) -> Self;

    fn spec_model_id(spec: &Self::Spec) -> &str;

    /// Key that must be unique within a model, if any.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Typed references to other documents that must exist before a spec
    /// can be stored.
    fn endpoints(_spec: &Self::Spec) -> Vec<(ObjectType, &str)> {
        Vec::new()
    }

    /// Fill in denormalized references to other documents.
    fn populate(&mut self, _store: &SledStore) -> Result<(), StoreError> {
        Ok(())
    }
}

impl Document for OccupationGroup {
    type Spec = NewOccupationGroupSpec;
    const COLLECTION: &'static str = "occupation_groups";

    fn create(id: String, spec: Self::Spec) -> Self {
        OccupationGroup::from_spec(id, spec)
    }

    fn spec_model_id(spec: &Self::Spec) -> &str {
        &spec.model_id
    }

    fn unique_key(&self) -> Option<String> {
        Some(format!("code:{}", self.code))
    }
}

impl Document for SkillGroup {
    type Spec = NewSkillGroupSpec;
    const COLLECTION: &'static str = "skill_groups";

    fn create(id: String, spec: Self::Spec) -> Self {
        SkillGroup::from_spec(id, spec)
    }

    fn spec_model_id(spec: &Self::Spec) -> &str {
        &spec.model_id
    }

    fn unique_key(&self) -> Option<String> {
        Some(format!("code:{}", self.code))
    }
}

impl Document for Skill {
    type Spec = NewSkillSpec;
    const COLLECTION: &'static str = "skills";

    fn create(id: String, spec: Self::Spec) -> Self {
        Skill::from_spec(id, spec)
    }

    fn spec_model_id(spec: &Self::Spec) -> &str {
        &spec.model_id
    }
}

impl Document for Occupation {
    type Spec = NewOccupationSpec;
    const COLLECTION: &'static str = "occupations";

    fn create(id: String, spec: Self::Spec) -> Self {
        Occupation::from_spec(id, spec)
    }

    fn spec_model_id(spec: &Self::Spec) -> &str {
        &spec.model_id
    }

    fn unique_key(&self) -> Option<String> {
        Some(format!("code:{}", self.code))
    }
}

impl Document for OccupationHierarchyPair {
    type Spec = NewOccupationHierarchyPairSpec;
    const COLLECTION: &'static str = "occupation_hierarchy";

    fn create(id: String, spec: Self::Spec) -> Self {
        OccupationHierarchyPair::from_spec(id, spec)
    }

    fn spec_model_id(spec: &Self::Spec) -> &str {
        &spec.model_id
    }

    // A child has at most one parent.
    fn unique_key(&self) -> Option<String> {
        Some(format!("child:{}:{}", self.child_type, self.child_id))
    }

    fn endpoints(spec: &Self::Spec) -> Vec<(ObjectType, &str)> {
        vec![
            (spec.parent_type, spec.parent_id.as_str()),
            (spec.child_type, spec.child_id.as_str()),
        ]
    }

    fn populate(&mut self, store: &SledStore) -> Result<(), StoreError> {
        self.parent = store.resolve_ref(self.parent_type, &self.model_id, &self.parent_id)?;
        self.child = store.resolve_ref(self.child_type, &self.model_id, &self.child_id)?;
        Ok(())
    }
}

impl Document for SkillHierarchyPair {
    type Spec = NewSkillHierarchyPairSpec;
    const COLLECTION: &'static str = "skill_hierarchy";

    fn create(id: String, spec: Self::Spec) -> Self {
        SkillHierarchyPair::from_spec(id, spec)
    }

    fn spec_model_id(spec: &Self::Spec) -> &str {
        &spec.model_id
    }

    fn unique_key(&self) -> Option<String> {
        Some(format!(
            "edge:{}:{}:{}:{}",
            self.parent_type, self.parent_id, self.child_type, self.child_id
        ))
    }

    fn endpoints(spec: &Self::Spec) -> Vec<(ObjectType, &str)> {
        vec![
            (spec.parent_type, spec.parent_id.as_str()),
            (spec.child_type, spec.child_id.as_str()),
        ]
    }

    fn populate(&mut self, store: &SledStore) -> Result<(), StoreError> {
        self.parent = store.resolve_ref(self.parent_type, &self.model_id, &self.parent_id)?;
        self.child = store.resolve_ref(self.child_type, &self.model_id, &self.child_id)?;
        Ok(())
    }
}

impl Document for OccupationToSkillRelationPair {
    type Spec = NewOccupationToSkillRelationPairSpec;
    const COLLECTION: &'static str = "occupation_to_skill_relations";

    fn create(id: String, spec: Self::Spec) -> Self {
        OccupationToSkillRelationPair::from_spec(id, spec)
    }

    fn spec_model_id(spec: &Self::Spec) -> &str {
        &spec.model_id
    }

    fn unique_key(&self) -> Option<String> {
        Some(format!(
            "pair:{}:{}",
            self.requiring_occupation_id, self.required_skill_id
        ))
    }

    fn endpoints(spec: &Self::Spec) -> Vec<(ObjectType, &str)> {
        vec![
            (
                spec.requiring_occupation_type,
                spec.requiring_occupation_id.as_str(),
            ),
            (ObjectType::Skill, spec.required_skill_id.as_str()),
        ]
    }

    fn populate(&mut self, store: &SledStore) -> Result<(), StoreError> {
        self.requiring_occupation = store.resolve_ref(
            self.requiring_occupation_type,
            &self.model_id,
            &self.requiring_occupation_id,
        )?;
        self.required_skill =
            store.resolve_ref(ObjectType::Skill, &self.model_id, &self.required_skill_id)?;
        Ok(())
    }
}

impl Document for SkillToSkillRelationPair {
    type Spec = NewSkillToSkillRelationPairSpec;
    const COLLECTION: &'static str = "skill_to_skill_relations";

    fn create(id: String, spec: Self::Spec) -> Self {
        SkillToSkillRelationPair::from_spec(id, spec)
    }

    fn spec_model_id(spec: &Self::Spec) -> &str {
        &spec.model_id
    }

    fn unique_key(&self) -> Option<String> {
        Some(format!(
            "pair:{}:{}",
            self.requiring_skill_id, self.required_skill_id
        ))
    }

    fn endpoints(spec: &Self::Spec) -> Vec<(ObjectType, &str)> {
        vec![
            (ObjectType::Skill, spec.requiring_skill_id.as_str()),
            (ObjectType::Skill, spec.required_skill_id.as_str()),
        ]
    }

    fn populate(&mut self, store: &SledStore) -> Result<(), StoreError> {
        self.requiring_skill =
            store.resolve_ref(ObjectType::Skill, &self.model_id, &self.requiring_skill_id)?;
        self.required_skill =
            store.resolve_ref(ObjectType::Skill, &self.model_id, &self.required_skill_id)?;
        Ok(())
    }
}
