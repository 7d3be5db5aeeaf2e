//! Entity models and wire shapes exchanged with the staffing backend.
//!
//! Field names follow the backend's camelCase JSON.

pub mod checkin;
pub mod company;
pub mod event;
pub mod report;
pub mod staff;

pub use checkin::{normalize_booth_code, CheckinInfo, CheckinRequest, CheckinValidation};
pub use company::ParticipantCompany;
pub use event::{Event, OrganizerCompany};
pub use report::{
    AnswerShape, ChoiceOption, FollowUp, NewReportSubmission, ReportButtonConfig, ReportKind,
    ReportSubmission, ReportTypeTag, NO_LABEL, YES_LABEL,
};
pub use staff::{Staff, StaffActivity};
