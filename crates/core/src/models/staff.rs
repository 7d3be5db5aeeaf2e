//! Staff roster and activity log models.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp};

/// A person working an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: EntityId,
    pub name: String,
    pub personal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// One logged action of a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffActivity {
    pub id: EntityId,
    pub description: String,
    pub timestamp: Timestamp,
}
