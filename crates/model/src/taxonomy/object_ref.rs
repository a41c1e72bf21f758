use serde::{Deserialize, Serialize};

use super::enums::ObjectType;

/// Summary of a referenced entity, filled in when relation documents are populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: String,
    pub object_type: ObjectType,
    pub code: Option<String>,
    pub preferred_label: String,
}
