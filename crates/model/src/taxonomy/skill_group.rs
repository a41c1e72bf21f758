use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Identified, ImportedEntity, new_uuid_history};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSkillGroupSpec {
    pub model_id: String,
    pub import_id: String,
    pub origin_uri: String,
    pub uuid_history: Vec<String>,
    pub code: String,
    pub preferred_label: String,
    pub alt_labels: Vec<String>,
    pub description: String,
    pub scope_note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub id: String,
    pub uuid: String,
    pub model_id: String,
    pub import_id: String,
    pub origin_uri: String,
    pub uuid_history: Vec<String>,
    pub code: String,
    pub preferred_label: String,
    pub alt_labels: Vec<String>,
    pub description: String,
    pub scope_note: String,
    pub created_at: DateTime<Utc>,
}

impl SkillGroup {
    pub fn from_spec(id: String, spec: NewSkillGroupSpec) -> Self {
        let (uuid, uuid_history) = new_uuid_history(spec.uuid_history);
        SkillGroup {
            id,
            uuid,
            model_id: spec.model_id,
            import_id: spec.import_id,
            origin_uri: spec.origin_uri,
            uuid_history,
            code: spec.code,
            preferred_label: spec.preferred_label,
            alt_labels: spec.alt_labels,
            description: spec.description,
            scope_note: spec.scope_note,
            created_at: Utc::now(),
        }
    }
}

impl Identified for SkillGroup {
    fn id(&self) -> &str {
        &self.id
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

impl ImportedEntity for SkillGroup {
    fn import_id(&self) -> &str {
        &self.import_id
    }
}
