//! In-memory staffing backend.
//!
//! Serves seeded data through [`StaffingApi`] so the flows and the CLI can
//! run without a server. Individual operations can be made to fail, and
//! every call is counted, which makes it the test double for the flows.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use boothlog_core::error::CoreError;
use boothlog_core::models::{
    normalize_booth_code, CheckinValidation, Event, NewReportSubmission, OrganizerCompany,
    ParticipantCompany, ReportButtonConfig, ReportSubmission, Staff, StaffActivity,
};
use boothlog_core::types::EntityId;
use serde::Deserialize;
use validator::Validate;

use crate::api::{ApiOperation, StaffingApi};
use crate::error::ApiError;

/// Message returned by operations marked as failing.
pub const UNAVAILABLE_MESSAGE: &str = "Serviço indisponível.";

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

/// A JSON document describing a whole backend, for offline use.
///
/// Child records name their parent with an extra id field next to the
/// entity's own fields, e.g. `{"organizerId": "O1", "id": "s1", ...}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryFixture {
    pub events: Vec<Event>,
    pub organizers: Vec<OrganizerCompany>,
    pub staff: Vec<FixtureStaff>,
    pub activities: Vec<FixtureActivity>,
    pub companies: Vec<FixtureCompany>,
    pub reports: Vec<ReportSubmission>,
    pub buttons: Vec<FixtureButton>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureStaff {
    pub organizer_id: EntityId,
    #[serde(flatten)]
    pub staff: Staff,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureActivity {
    pub staff_id: EntityId,
    #[serde(flatten)]
    pub activity: StaffActivity,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureCompany {
    pub event_id: EntityId,
    #[serde(flatten)]
    pub company: ParticipantCompany,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureButton {
    pub event_id: EntityId,
    #[serde(flatten)]
    pub button: ReportButtonConfig,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemoryState {
    events: Vec<Event>,
    organizers: Vec<OrganizerCompany>,
    /// (organizer id, staff)
    staff: Vec<(EntityId, Staff)>,
    activities: HashMap<EntityId, Vec<StaffActivity>>,
    /// (event id, company)
    companies: Vec<(EntityId, ParticipantCompany)>,
    reports: Vec<ReportSubmission>,
    buttons: HashMap<EntityId, Vec<ReportButtonConfig>>,
    failing: HashSet<ApiOperation>,
    calls: HashMap<ApiOperation, usize>,
    next_report_id: u64,
}

impl MemoryState {
    fn company_event(&self, booth_code: &str) -> Option<(&EntityId, &ParticipantCompany)> {
        self.companies
            .iter()
            .find(|(_, c)| c.booth_code == booth_code)
            .map(|(event_id, c)| (event_id, c))
    }
}

/// Seeded in-memory implementation of [`StaffingApi`].
#[derive(Debug, Default)]
pub struct InMemoryStaffingApi {
    state: Mutex<MemoryState>,
}

impl InMemoryStaffingApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a backend from a parsed fixture document.
    pub fn from_fixture(fixture: MemoryFixture) -> Self {
        let mut api = Self::new();
        for event in fixture.events {
            api = api.with_event(event);
        }
        for organizer in fixture.organizers {
            api = api.with_organizer(organizer);
        }
        for entry in fixture.staff {
            api = api.with_staff(&entry.organizer_id, entry.staff);
        }
        for entry in fixture.activities {
            api = api.with_activity(&entry.staff_id, entry.activity);
        }
        for entry in fixture.companies {
            api = api.with_company(&entry.event_id, entry.company);
        }
        for report in fixture.reports {
            api = api.with_report(report);
        }
        for entry in fixture.buttons {
            api = api.with_button(&entry.event_id, entry.button);
        }
        api
    }

    fn state_mut(&mut self) -> &mut MemoryState {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.state_mut().events.push(event);
        self
    }

    pub fn with_organizer(mut self, organizer: OrganizerCompany) -> Self {
        self.state_mut().organizers.push(organizer);
        self
    }

    pub fn with_staff(mut self, organizer_id: &str, staff: Staff) -> Self {
        self.state_mut().staff.push((organizer_id.to_string(), staff));
        self
    }

    pub fn with_activity(mut self, staff_id: &str, activity: StaffActivity) -> Self {
        self.state_mut()
            .activities
            .entry(staff_id.to_string())
            .or_default()
            .push(activity);
        self
    }

    pub fn with_company(mut self, event_id: &str, company: ParticipantCompany) -> Self {
        self.state_mut().companies.push((event_id.to_string(), company));
        self
    }

    pub fn with_report(mut self, report: ReportSubmission) -> Self {
        self.state_mut().reports.push(report);
        self
    }

    pub fn with_button(mut self, event_id: &str, button: ReportButtonConfig) -> Self {
        self.state_mut()
            .buttons
            .entry(event_id.to_string())
            .or_default()
            .push(button);
        self
    }

    /// Make `operation` fail with a 503 until [`recover`](Self::recover).
    pub fn fail(&self, operation: ApiOperation) {
        self.lock().failing.insert(operation);
    }

    pub fn recover(&self, operation: ApiOperation) {
        self.lock().failing.remove(&operation);
    }

    /// How many times `operation` has been called, failed calls included.
    pub fn calls(&self, operation: ApiOperation) -> usize {
        self.lock().calls.get(&operation).copied().unwrap_or(0)
    }

    /// All stored reports, in insertion order.
    pub fn reports(&self) -> Vec<ReportSubmission> {
        self.lock().reports.clone()
    }

    /// Count the call and return the state, or the injected failure.
    fn enter(&self, operation: ApiOperation) -> Result<MutexGuard<'_, MemoryState>, ApiError> {
        let mut state = self.lock();
        *state.calls.entry(operation).or_default() += 1;
        if state.failing.contains(&operation) {
            tracing::debug!(%operation, "Injected failure");
            return Err(ApiError::backend(503, "UNAVAILABLE", UNAVAILABLE_MESSAGE));
        }
        Ok(state)
    }
}

#[async_trait]
impl StaffingApi for InMemoryStaffingApi {
    async fn get_events(&self) -> Result<Vec<Event>, ApiError> {
        let state = self.enter(ApiOperation::GetEvents)?;
        Ok(state.events.clone())
    }

    async fn get_organizer_company_by_id(&self, id: &str) -> Result<OrganizerCompany, ApiError> {
        let state = self.enter(ApiOperation::GetOrganizer)?;
        state
            .organizers
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| ApiError::backend(404, "NOT_FOUND", format!("organizer with id {id} not found")))
    }

    async fn get_staff_by_organizer(&self, organizer_id: &str) -> Result<Vec<Staff>, ApiError> {
        let state = self.enter(ApiOperation::GetStaff)?;
        Ok(state
            .staff
            .iter()
            .filter(|(org, _)| org == organizer_id)
            .map(|(_, s)| s.clone())
            .collect())
    }

    async fn get_staff_activity(&self, staff_id: &str) -> Result<Vec<StaffActivity>, ApiError> {
        let state = self.enter(ApiOperation::GetStaffActivity)?;
        Ok(state.activities.get(staff_id).cloned().unwrap_or_default())
    }

    async fn get_participant_companies_by_event(
        &self,
        event_id: &str,
    ) -> Result<Vec<ParticipantCompany>, ApiError> {
        let state = self.enter(ApiOperation::GetCompanies)?;
        Ok(state
            .companies
            .iter()
            .filter(|(ev, _)| ev == event_id)
            .map(|(_, c)| c.clone())
            .collect())
    }

    async fn get_reports_by_event(&self, event_id: &str) -> Result<Vec<ReportSubmission>, ApiError> {
        let state = self.enter(ApiOperation::GetReports)?;
        Ok(state
            .reports
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn get_report_buttons_for_booth(
        &self,
        booth_code: &str,
    ) -> Result<Vec<ReportButtonConfig>, ApiError> {
        let state = self.enter(ApiOperation::GetReportButtons)?;
        let Some((event_id, _)) = state.company_event(booth_code) else {
            return Ok(Vec::new());
        };
        Ok(state.buttons.get(event_id).cloned().unwrap_or_default())
    }

    async fn submit_report(&self, report: &NewReportSubmission) -> Result<(), ApiError> {
        let mut state = self.enter(ApiOperation::SubmitReport)?;
        report.validate().map_err(CoreError::from)?;

        state.next_report_id += 1;
        let id = format!("r{}", state.next_report_id);
        state.reports.push(ReportSubmission {
            id,
            event_id: report.event_id.clone(),
            booth_code: report.booth_code.clone(),
            staff_name: report.staff_name.clone(),
            report_label: report.report_label.clone(),
            response: report.response.clone(),
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    async fn validate_checkin(
        &self,
        booth_code: &str,
        personal_code: &str,
    ) -> Result<CheckinValidation, ApiError> {
        let state = self.enter(ApiOperation::ValidateCheckin)?;
        let booth_code = normalize_booth_code(booth_code);

        let Some((event_id, company)) = state.company_event(&booth_code) else {
            return Err(ApiError::backend(404, "NOT_FOUND", "Código do estande inválido."));
        };
        let Some(event) = state.events.iter().find(|e| &e.id == event_id) else {
            return Err(ApiError::backend(404, "NOT_FOUND", "Evento não encontrado."));
        };
        let staff = state
            .staff
            .iter()
            .find(|(org, s)| *org == event.organizer_company_id && s.personal_code == personal_code)
            .map(|(_, s)| s.clone())
            .ok_or_else(|| {
                ApiError::backend(403, "FORBIDDEN", "Código pessoal inválido para este evento.")
            })?;

        Ok(CheckinValidation {
            staff,
            event: event.clone(),
            company: company.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
