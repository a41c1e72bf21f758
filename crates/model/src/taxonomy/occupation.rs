use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Identified, ImportedEntity, enums::OccupationType, new_uuid_history};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOccupationSpec {
    pub model_id: String,
    pub import_id: String,
    pub origin_uri: String,
    pub uuid_history: Vec<String>,
    /// Code of the occupation group the occupation sits under.
    pub occupation_group_code: String,
    pub code: String,
    pub preferred_label: String,
    pub alt_labels: Vec<String>,
    pub description: String,
    pub definition: String,
    pub scope_note: String,
    pub regulated_profession_note: String,
    pub occupation_type: OccupationType,
    pub is_localized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupation {
    pub id: String,
    pub uuid: String,
    pub model_id: String,
    pub import_id: String,
    pub origin_uri: String,
    pub uuid_history: Vec<String>,
    pub occupation_group_code: String,
    pub code: String,
    pub preferred_label: String,
    pub alt_labels: Vec<String>,
    pub description: String,
    pub definition: String,
    pub scope_note: String,
    pub regulated_profession_note: String,
    pub occupation_type: OccupationType,
    pub is_localized: bool,
    pub created_at: DateTime<Utc>,
}

impl Occupation {
    pub fn from_spec(id: String, spec: NewOccupationSpec) -> Self {
        let (uuid, uuid_history) = new_uuid_history(spec.uuid_history);
        Occupation {
            id,
            uuid,
            model_id: spec.model_id,
            import_id: spec.import_id,
            origin_uri: spec.origin_uri,
            uuid_history,
            occupation_group_code: spec.occupation_group_code,
            code: spec.code,
            preferred_label: spec.preferred_label,
            alt_labels: spec.alt_labels,
            description: spec.description,
            definition: spec.definition,
            scope_note: spec.scope_note,
            regulated_profession_note: spec.regulated_profession_note,
            occupation_type: spec.occupation_type,
            is_localized: spec.is_localized,
            created_at: Utc::now(),
        }
    }
}

impl Identified for Occupation {
    fn id(&self) -> &str {
        &self.id
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

impl ImportedEntity for Occupation {
    fn import_id(&self) -> &str {
        &self.import_id
    }
}
