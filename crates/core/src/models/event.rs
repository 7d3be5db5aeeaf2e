//! Event and organizer entity models.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// A single staffed exhibition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EntityId,
    pub name: String,
    pub organizer_company_id: EntityId,
}

/// The company running an event. Owns the staff roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerCompany {
    pub id: EntityId,
    pub name: String,
}
