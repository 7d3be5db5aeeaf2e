//! Dashboard Aggregator.
//!
//! Loads everything the organizer view needs for one event and derives the
//! by-staff and by-company projections from it. Each slot is written as
//! soon as its fetch succeeds; a failure further down the chain keeps what
//! was already loaded.

use std::collections::HashMap;

use boothlog_client::{ApiError, StaffingApi};
use boothlog_core::aggregate::{self, CompanyCard, StaffCard, ViewMode};
use boothlog_core::models::{
    Event, OrganizerCompany, ParticipantCompany, ReportSubmission, Staff, StaffActivity,
};
use boothlog_core::types::EntityId;
use futures::future::try_join_all;

#[derive(Debug, Default)]
pub struct Dashboard {
    event_id: EntityId,
    event: Option<Event>,
    organizer: Option<OrganizerCompany>,
    staff: Vec<Staff>,
    companies: Vec<ParticipantCompany>,
    /// Newest first.
    reports: Vec<ReportSubmission>,
    activities: HashMap<EntityId, Vec<StaffActivity>>,
    view_mode: ViewMode,
    search_term: String,
    last_error: Option<String>,
}

impl Dashboard {
    /// An empty dashboard for `event_id`. Nothing is fetched.
    pub fn new(event_id: impl Into<EntityId>) -> Self {
        Self {
            event_id: event_id.into(),
            ..Self::default()
        }
    }

    /// Create and [`refresh`](Self::refresh) in one step.
    pub async fn load(api: &dyn StaffingApi, event_id: impl Into<EntityId>) -> Self {
        let mut dashboard = Self::new(event_id);
        dashboard.refresh(api).await;
        dashboard
    }

    /// Re-run the whole fetch chain.
    ///
    /// Never fails: errors are logged, remembered in
    /// [`last_error`](Self::last_error), and the data loaded so far stays.
    pub async fn refresh(&mut self, api: &dyn StaffingApi) {
        self.last_error = None;
        if let Err(e) = self.fetch(api).await {
            tracing::error!(event_id = %self.event_id, error = %e, "Dashboard load failed");
            self.last_error = Some(e.to_string());
        }
    }

    async fn fetch(&mut self, api: &dyn StaffingApi) -> Result<(), ApiError> {
        let events = api.get_events().await?;
        self.event = events.into_iter().find(|e| e.id == self.event_id);
        let Some(event) = &self.event else {
            tracing::warn!(event_id = %self.event_id, "Event not found");
            return Ok(());
        };
        let organizer_id = event.organizer_company_id.clone();

        self.organizer = Some(api.get_organizer_company_by_id(&organizer_id).await?);

        let (staff, companies, mut reports) = tokio::try_join!(
            api.get_staff_by_organizer(&organizer_id),
            api.get_participant_companies_by_event(&self.event_id),
            api.get_reports_by_event(&self.event_id),
        )?;
        aggregate::sort_reports_newest_first(&mut reports);
        self.staff = staff;
        self.companies = companies;
        self.reports = reports;

        let logs = try_join_all(self.staff.iter().map(|s| api.get_staff_activity(&s.id))).await?;
        self.activities = self
            .staff
            .iter()
            .map(|s| s.id.clone())
            .zip(logs)
            .collect();

        tracing::info!(
            event_id = %self.event_id,
            staff = self.staff.len(),
            companies = self.companies.len(),
            reports = self.reports.len(),
            "Dashboard loaded",
        );
        Ok(())
    }

    // ---- accessors ----

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    pub fn organizer(&self) -> Option<&OrganizerCompany> {
        self.organizer.as_ref()
    }

    pub fn staff(&self) -> &[Staff] {
        &self.staff
    }

    pub fn companies(&self) -> &[ParticipantCompany] {
        &self.companies
    }

    pub fn reports(&self) -> &[ReportSubmission] {
        &self.reports
    }

    pub fn activities_of(&self, staff_id: &str) -> &[StaffActivity] {
        self.activities.get(staff_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// The message of the last failed refresh, if it failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn staff_by_code(&self, personal_code: &str) -> Option<&Staff> {
        self.staff.iter().find(|s| s.personal_code == personal_code)
    }

    pub fn company_by_booth(&self, booth_code: &str) -> Option<&ParticipantCompany> {
        self.companies.iter().find(|c| c.booth_code == booth_code)
    }

    // ---- view state ----

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        self.view_mode
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    // ---- projections ----

    pub fn staff_cards(&self) -> Vec<StaffCard<'_>> {
        aggregate::staff_cards(&self.staff, &self.activities, &self.search_term)
    }

    pub fn company_cards(&self) -> Vec<CompanyCard<'_>> {
        aggregate::company_cards(&self.companies, &self.reports, &self.search_term)
    }
}
