use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Identified,
    enums::{ObjectType, RelationType},
    object_ref::ObjectRef,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOccupationToSkillRelationPairSpec {
    pub model_id: String,
    /// Always one of the occupation object types.
    pub requiring_occupation_type: ObjectType,
    pub requiring_occupation_id: String,
    pub relation_type: RelationType,
    pub required_skill_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSkillToSkillRelationPairSpec {
    pub model_id: String,
    pub requiring_skill_id: String,
    pub relation_type: RelationType,
    pub required_skill_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationToSkillRelationPair {
    pub id: String,
    pub model_id: String,
    pub requiring_occupation_type: ObjectType,
    pub requiring_occupation_id: String,
    pub relation_type: RelationType,
    pub required_skill_id: String,
    #[serde(default)]
    pub requiring_occupation: Option<ObjectRef>,
    #[serde(default)]
    pub required_skill: Option<ObjectRef>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillToSkillRelationPair {
    pub id: String,
    pub model_id: String,
    pub requiring_skill_id: String,
    pub relation_type: RelationType,
    pub required_skill_id: String,
    #[serde(default)]
    pub requiring_skill: Option<ObjectRef>,
    #[serde(default)]
    pub required_skill: Option<ObjectRef>,
    pub created_at: DateTime<Utc>,
}

impl OccupationToSkillRelationPair {
    pub fn from_spec(id: String, spec: NewOccupationToSkillRelationPairSpec) -> Self {
        OccupationToSkillRelationPair {
            id,
            model_id: spec.model_id,
            requiring_occupation_type: spec.requiring_occupation_type,
            requiring_occupation_id: spec.requiring_occupation_id,
            relation_type: spec.relation_type,
            required_skill_id: spec.required_skill_id,
            requiring_occupation: None,
            required_skill: None,
            created_at: Utc::now(),
        }
    }
}

impl SkillToSkillRelationPair {
    pub fn from_spec(id: String, spec: NewSkillToSkillRelationPairSpec) -> Self {
        SkillToSkillRelationPair {
            id,
            model_id: spec.model_id,
            requiring_skill_id: spec.requiring_skill_id,
            relation_type: spec.relation_type,
            required_skill_id: spec.required_skill_id,
            requiring_skill: None,
            required_skill: None,
            created_at: Utc::now(),
        }
    }
}

impl Identified for OccupationToSkillRelationPair {
    fn id(&self) -> &str {
        &self.id
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

impl Identified for SkillToSkillRelationPair {
    fn id(&self) -> &str {
        &self.id
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
