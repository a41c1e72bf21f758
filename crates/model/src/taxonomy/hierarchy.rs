use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Identified, enums::ObjectType, object_ref::ObjectRef};

/// Parent/child link between two occupation-family entities.
/// Both ids are storage ids, already resolved from the source natural keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOccupationHierarchyPairSpec {
    pub model_id: String,
    pub parent_type: ObjectType,
    pub parent_id: String,
    pub child_type: ObjectType,
    pub child_id: String,
}

/// Parent/child link between two skill-family entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSkillHierarchyPairSpec {
    pub model_id: String,
    pub parent_type: ObjectType,
    pub parent_id: String,
    pub child_type: ObjectType,
    pub child_id: String,
}

/// A persisted hierarchy edge. `parent` and `child` are filled in when the
/// document is populated after a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyPair {
    pub id: String,
    pub model_id: String,
    pub parent_type: ObjectType,
    pub parent_id: String,
    pub child_type: ObjectType,
    pub child_id: String,
    #[serde(default)]
    pub parent: Option<ObjectRef>,
    #[serde(default)]
    pub child: Option<ObjectRef>,
    pub created_at: DateTime<Utc>,
}

/// Occupation hierarchy edge as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationHierarchyPair(pub HierarchyPair);

/// Skill hierarchy edge as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillHierarchyPair(pub HierarchyPair);

impl HierarchyPair {
    fn new(
        id: String,
        model_id: String,
        parent: (ObjectType, String),
        child: (ObjectType, String),
    ) -> Self {
        HierarchyPair {
            id,
            model_id,
            parent_type: parent.0,
            parent_id: parent.1,
            child_type: child.0,
            child_id: child.1,
            parent: None,
            child: None,
            created_at: Utc::now(),
        }
    }
}

impl OccupationHierarchyPair {
    pub fn from_spec(id: String, spec: NewOccupationHierarchyPairSpec) -> Self {
        Self(HierarchyPair::new(
            id,
            spec.model_id,
            (spec.parent_type, spec.parent_id),
            (spec.child_type, spec.child_id),
        ))
    }
}

impl SkillHierarchyPair {
    pub fn from_spec(id: String, spec: NewSkillHierarchyPairSpec) -> Self {
        Self(HierarchyPair::new(
            id,
            spec.model_id,
            (spec.parent_type, spec.parent_id),
            (spec.child_type, spec.child_id),
        ))
    }
}

impl std::ops::Deref for OccupationHierarchyPair {
    type Target = HierarchyPair;

    fn deref(&self) -> &HierarchyPair {
        &self.0
    }
}

impl std::ops::DerefMut for OccupationHierarchyPair {
    fn deref_mut(&mut self) -> &mut HierarchyPair {
        &mut self.0
    }
}

impl std::ops::Deref for SkillHierarchyPair {
    type Target = HierarchyPair;

    fn deref(&self) -> &HierarchyPair {
        &self.0
    }
}

impl std::ops::DerefMut for SkillHierarchyPair {
    fn deref_mut(&mut self) -> &mut HierarchyPair {
        &mut self.0
    }
}

impl Identified for OccupationHierarchyPair {
    fn id(&self) -> &str {
        &self.0.id
    }

    fn model_id(&self) -> &str {
        &self.0.model_id
    }
}

impl Identified for SkillHierarchyPair {
    fn id(&self) -> &str {
        &self.0.id
    }

    fn model_id(&self) -> &str {
        &self.0.model_id
    }
}
