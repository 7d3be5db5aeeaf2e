use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// An exhibiting company. `booth_code` is the join key against
/// [`ReportSubmission::booth_code`](super::ReportSubmission) and is compared
/// exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantCompany {
    pub id: EntityId,
    pub name: String,
    pub booth_code: String,
}
