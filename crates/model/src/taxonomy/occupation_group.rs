use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Identified, ImportedEntity, enums::OccupationGroupType, new_uuid_history};

/// Validated occupation group ready for bulk persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOccupationGroupSpec {
    pub model_id: String,
    pub import_id: String,
    pub origin_uri: String,
    pub uuid_history: Vec<String>,
    pub code: String,
    pub group_type: OccupationGroupType,
    pub preferred_label: String,
    pub alt_labels: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationGroup {
    pub id: String,
    pub uuid: String,
    pub model_id: String,
    pub import_id: String,
    pub origin_uri: String,
    pub uuid_history: Vec<String>,
    pub code: String,
    pub group_type: OccupationGroupType,
    pub preferred_label: String,
    pub alt_labels: Vec<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl OccupationGroup {
    pub fn from_spec(id: String, spec: NewOccupationGroupSpec) -> Self {
        let (uuid, uuid_history) = new_uuid_history(spec.uuid_history);
        OccupationGroup {
            id,
            uuid,
            model_id: spec.model_id,
            import_id: spec.import_id,
            origin_uri: spec.origin_uri,
            uuid_history,
            code: spec.code,
            group_type: spec.group_type,
            preferred_label: spec.preferred_label,
            alt_labels: spec.alt_labels,
            description: spec.description,
            created_at: Utc::now(),
        }
    }
}

impl Identified for OccupationGroup {
    fn id(&self) -> &str {
        &self.id
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

impl ImportedEntity for OccupationGroup {
    fn import_id(&self) -> &str {
        &self.import_id
    }
}
