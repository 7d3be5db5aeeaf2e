//! Check-in identity and its validation shapes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Event, ParticipantCompany, Staff};
use crate::types::EntityId;

/// The identity of a checked-in staff member at a booth.
///
/// Held for one session only and always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinInfo {
    pub staff_name: String,
    pub personal_code: String,
    pub event_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<EntityId>,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub booth_code: String,
}

impl CheckinInfo {
    /// Build the session record from a successful check-in validation.
    ///
    /// `booth_code` is stored normalized.
    pub fn from_validation(booth_code: &str, personal_code: &str, validated: &CheckinValidation) -> Self {
        Self {
            staff_name: validated.staff.name.clone(),
            personal_code: personal_code.to_string(),
            event_id: validated.event.id.clone(),
            department_id: validated.staff.department_id.clone(),
            company_name: validated.company.name.clone(),
            booth_code: normalize_booth_code(booth_code),
        }
    }
}

/// Payload for `POST /checkin/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRequest {
    #[validate(length(min = 1, message = "boothCode must not be empty"))]
    pub booth_code: String,
    #[validate(length(min = 1, message = "personalCode must not be empty"))]
    pub personal_code: String,
}

/// Backend confirmation that a staff member may work at a booth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinValidation {
    pub staff: Staff,
    pub event: Event,
    pub company: ParticipantCompany,
}

/// Booth codes are typed by hand: uppercase them and drop all whitespace.
pub fn normalize_booth_code(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation() -> CheckinValidation {
        CheckinValidation {
            staff: Staff {
                id: "s1".into(),
                name: "Ana".into(),
                personal_code: "A1".into(),
                department_id: Some("D1".into()),
                photo_url: None,
            },
            event: Event {
                id: "E1".into(),
                name: "Feira".into(),
                organizer_company_id: "O1".into(),
            },
            company: ParticipantCompany {
                id: "c1".into(),
                name: "Acme".into(),
                booth_code: "B1".into(),
            },
        }
    }

    #[test]
    fn normalize_strips_whitespace_and_uppercases() {
        assert_eq!(normalize_booth_code(" b 1\t"), "B1");
        assert_eq!(normalize_booth_code(""), "");
    }

    #[test]
    fn from_validation_copies_identity() {
        let info = CheckinInfo::from_validation("b1", "A1", &validation());
        assert_eq!(info.staff_name, "Ana");
        assert_eq!(info.booth_code, "B1");
        assert_eq!(info.event_id, "E1");
        assert_eq!(info.department_id.as_deref(), Some("D1"));
        assert_eq!(info.company_name, "Acme");
    }

    #[test]
    fn checkin_info_round_trips_session_json() {
        let info = CheckinInfo::from_validation("B1", "A1", &validation());
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"personalCode\":\"A1\""));
        let back: CheckinInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }

    #[test]
    fn checkin_info_missing_event_is_rejected() {
        let result: Result<CheckinInfo, _> =
            serde_json::from_str(r#"{"staffName":"Ana","personalCode":"A1"}"#);
        assert!(result.is_err());
    }
}
