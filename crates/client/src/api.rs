//! The backend boundary.

use std::fmt;

use async_trait::async_trait;
use boothlog_core::models::{
    CheckinValidation, Event, NewReportSubmission, OrganizerCompany, ParticipantCompany,
    ReportButtonConfig, ReportSubmission, Staff, StaffActivity,
};

use crate::error::ApiError;

/// Operations the staffing backend exposes.
///
/// Every call is a single request with no retry. Implementations must be
/// object safe so flows can hold a `&dyn StaffingApi`.
#[async_trait]
pub trait StaffingApi: Send + Sync {
    async fn get_events(&self) -> Result<Vec<Event>, ApiError>;

    async fn get_organizer_company_by_id(&self, id: &str) -> Result<OrganizerCompany, ApiError>;

    async fn get_staff_by_organizer(&self, organizer_id: &str) -> Result<Vec<Staff>, ApiError>;

    async fn get_staff_activity(&self, staff_id: &str) -> Result<Vec<StaffActivity>, ApiError>;

    async fn get_participant_companies_by_event(
        &self,
        event_id: &str,
    ) -> Result<Vec<ParticipantCompany>, ApiError>;

    async fn get_reports_by_event(&self, event_id: &str) -> Result<Vec<ReportSubmission>, ApiError>;

    /// Report actions configured for the event the booth belongs to.
    async fn get_report_buttons_for_booth(
        &self,
        booth_code: &str,
    ) -> Result<Vec<ReportButtonConfig>, ApiError>;

    async fn submit_report(&self, report: &NewReportSubmission) -> Result<(), ApiError>;

    /// Confirm that the staff member with `personal_code` may work at
    /// `booth_code`. Failures carry a message meant for the user.
    async fn validate_checkin(
        &self,
        booth_code: &str,
        personal_code: &str,
    ) -> Result<CheckinValidation, ApiError>;
}

/// Names of the [`StaffingApi`] operations, used for logging and for fault
/// injection in [`InMemoryStaffingApi`](crate::InMemoryStaffingApi).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    GetEvents,
    GetOrganizer,
    GetStaff,
    GetStaffActivity,
    GetCompanies,
    GetReports,
    GetReportButtons,
    SubmitReport,
    ValidateCheckin,
}

impl ApiOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiOperation::GetEvents => "get_events",
            ApiOperation::GetOrganizer => "get_organizer_company_by_id",
            ApiOperation::GetStaff => "get_staff_by_organizer",
            ApiOperation::GetStaffActivity => "get_staff_activity",
            ApiOperation::GetCompanies => "get_participant_companies_by_event",
            ApiOperation::GetReports => "get_reports_by_event",
            ApiOperation::GetReportButtons => "get_report_buttons_for_booth",
            ApiOperation::SubmitReport => "submit_report",
            ApiOperation::ValidateCheckin => "validate_checkin",
        }
    }
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
