//! Booth page: the staff member's view of one booth.
//!
//! Opening the page requires a stored check-in. The page shows the report
//! actions visible to the staff member's department and owns the report
//! modal. Switching booths re-validates against the backend before the
//! session is replaced.

use boothlog_client::StaffingApi;
use boothlog_core::catalog;
use boothlog_core::models::{normalize_booth_code, CheckinInfo, ReportButtonConfig};

use crate::catalog::lookup_buttons;
use crate::error::{FlowError, SwitchError};
use crate::session::{self, require_checkin, SessionError, SessionStore};
use crate::submission::{ModalError, ReportModal, SubmitContext};

#[derive(Debug)]
pub struct BoothPage {
    session: CheckinInfo,
    booth_code: String,
    buttons: Vec<ReportButtonConfig>,
    modal: ReportModal,
}

impl BoothPage {
    /// Load the page for `booth_code`.
    ///
    /// Fails with [`FlowError::NotCheckedIn`] before any request when there
    /// is no session, and with [`FlowError::LoadFailed`] when the catalog
    /// cannot be fetched.
    pub async fn open(
        api: &dyn StaffingApi,
        store: &dyn SessionStore,
        booth_code: &str,
    ) -> Result<Self, FlowError> {
        let session = require_checkin(store)?;
        let booth_code = normalize_booth_code(booth_code);
        let buttons = lookup_buttons(api, &booth_code).await?;

        tracing::info!(
            %booth_code,
            staff = %session.staff_name,
            actions = buttons.len(),
            "Booth page opened",
        );
        Ok(Self {
            session,
            booth_code,
            buttons,
            modal: ReportModal::new(),
        })
    }

    pub fn session(&self) -> &CheckinInfo {
        &self.session
    }

    pub fn booth_code(&self) -> &str {
        &self.booth_code
    }

    /// Page heading: the company name when known, else the booth code.
    pub fn heading(&self) -> &str {
        if self.session.booth_code == self.booth_code && !self.session.company_name.is_empty() {
            &self.session.company_name
        } else {
            &self.booth_code
        }
    }

    /// Actions the checked-in staff member may use, in catalog order.
    pub fn visible_buttons(&self) -> Vec<&ReportButtonConfig> {
        catalog::visible_buttons(&self.buttons, self.session.department_id.as_deref())
    }

    pub fn modal(&self) -> &ReportModal {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut ReportModal {
        &mut self.modal
    }

    /// Open the modal for a visible action, found by id or label.
    pub fn open_report(&mut self, action: &str) -> Result<(), FlowError> {
        let button = self
            .visible_buttons()
            .into_iter()
            .find(|b| b.id == action || b.label == action)
            .cloned()
            .ok_or_else(|| FlowError::UnknownAction(action.to_string()))?;
        self.modal.open(button)?;
        Ok(())
    }

    /// Submit the modal's answer as this booth's staff member.
    pub async fn submit_report(&mut self, api: &dyn StaffingApi) -> Result<(), ModalError> {
        let ctx = SubmitContext {
            session: &self.session,
            booth_code: &self.booth_code,
        };
        self.modal.submit(api, ctx).await
    }

    /// Re-validate the current staff member at `typed_code`.
    ///
    /// On success the stored session is replaced and the new identity is
    /// returned; the caller then opens the new booth's page. On failure
    /// nothing changes.
    pub async fn switch_booth(
        &self,
        api: &dyn StaffingApi,
        store: &dyn SessionStore,
        typed_code: &str,
    ) -> Result<CheckinInfo, SwitchError> {
        switch_booth(api, store, &self.session, typed_code).await
    }

    /// Clear the session and leave the page.
    pub fn exit(self, store: &dyn SessionStore) -> Result<(), SessionError> {
        session::exit(store)
    }
}

/// Move `current` to the booth typed by the user, keeping its personal code.
///
/// An empty code is refused without a request. A backend refusal is
/// returned verbatim and leaves the stored session untouched.
pub async fn switch_booth(
    api: &dyn StaffingApi,
    store: &dyn SessionStore,
    current: &CheckinInfo,
    typed_code: &str,
) -> Result<CheckinInfo, SwitchError> {
    let booth_code = normalize_booth_code(typed_code);
    if booth_code.is_empty() {
        return Err(SwitchError::MissingBoothCode);
    }

    tracing::info!(from = %current.booth_code, to = %booth_code, "Switching booth");
    session::check_in(api, store, &booth_code, &current.personal_code).await
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use boothlog_client::{ApiOperation, InMemoryStaffingApi};
    use boothlog_core::models::{
        Event, OrganizerCompany, ParticipantCompany, ReportKind, Staff,
    };

    use super::*;
    use crate::session::MemorySessionStore;

    fn api() -> InMemoryStaffingApi {
        InMemoryStaffingApi::new()
            .with_event(Event {
                id: "E1".into(),
                name: "Feira".into(),
                organizer_company_id: "O1".into(),
            })
            .with_organizer(OrganizerCompany {
                id: "O1".into(),
                name: "Org".into(),
            })
            .with_staff(
                "O1",
                Staff {
                    id: "s1".into(),
                    name: "Ana".into(),
                    personal_code: "A1".into(),
                    department_id: Some("D1".into()),
                    photo_url: None,
                },
            )
            .with_company(
                "E1",
                ParticipantCompany {
                    id: "c1".into(),
                    name: "Acme".into(),
                    booth_code: "B1".into(),
                },
            )
            .with_company(
                "E1",
                ParticipantCompany {
                    id: "c2".into(),
                    name: "Beta".into(),
                    booth_code: "B2".into(),
                },
            )
            .with_button(
                "E1",
                ReportButtonConfig {
                    id: "b1".into(),
                    label: "Feedback".into(),
                    question: "Como foi?".into(),
                    kind: ReportKind::OpenText,
                    department_id: None,
                },
            )
    }

    #[tokio::test]
    async fn open_without_session_makes_no_request() {
        let api = api();
        let store = MemorySessionStore::new();
        assert_matches!(
            BoothPage::open(&api, &store, "B1").await,
            Err(FlowError::NotCheckedIn)
        );
        assert_eq!(api.calls(ApiOperation::GetReportButtons), 0);
    }

    #[tokio::test]
    async fn heading_prefers_company_name() {
        let api = api();
        let store = MemorySessionStore::new();
        session::check_in(&api, &store, "b1", "A1").await.unwrap();
        let page = BoothPage::open(&api, &store, "B1").await.unwrap();
        assert_eq!(page.heading(), "Acme");
    }

    #[tokio::test]
    async fn unknown_action_is_refused() {
        let api = api();
        let store = MemorySessionStore::new();
        session::check_in(&api, &store, "B1", "A1").await.unwrap();
        let mut page = BoothPage::open(&api, &store, "B1").await.unwrap();
        assert_matches!(page.open_report("nope"), Err(FlowError::UnknownAction(_)));
        page.open_report("Feedback").unwrap();
        assert!(page.modal().is_open());
    }

    #[tokio::test]
    async fn switch_replaces_session() {
        let api = api();
        let store = MemorySessionStore::new();
        session::check_in(&api, &store, "B1", "A1").await.unwrap();
        let page = BoothPage::open(&api, &store, "B1").await.unwrap();

        let moved = page.switch_booth(&api, &store, " b2 ").await.unwrap();
        assert_eq!(moved.booth_code, "B2");
        assert_eq!(moved.company_name, "Beta");
        assert_eq!(store.load(), Some(moved));
    }

    #[tokio::test]
    async fn empty_switch_code_is_refused_without_a_request() {
        let api = api();
        let store = MemorySessionStore::new();
        let before = session::check_in(&api, &store, "B1", "A1").await.unwrap();
        let calls = api.calls(ApiOperation::ValidateCheckin);

        assert_matches!(
            switch_booth(&api, &store, &before, "   ").await,
            Err(SwitchError::MissingBoothCode)
        );
        assert_eq!(api.calls(ApiOperation::ValidateCheckin), calls);
        assert_eq!(store.load(), Some(before));
    }

    #[tokio::test]
    async fn exit_clears_session() {
        let api = api();
        let store = MemorySessionStore::new();
        session::check_in(&api, &store, "B1", "A1").await.unwrap();
        let page = BoothPage::open(&api, &store, "B1").await.unwrap();
        page.exit(&store).unwrap();
        assert!(store.load().is_none());
    }
}
