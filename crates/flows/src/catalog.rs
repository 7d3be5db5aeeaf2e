//! Report Catalog Lookup.

use boothlog_client::StaffingApi;
use boothlog_core::error::CoreError;
use boothlog_core::models::{normalize_booth_code, ReportButtonConfig};

use crate::error::{FlowError, LOAD_ACTIONS_FAILED};

/// Fetch the report actions configured for the event `booth_code` belongs to.
///
/// The backend order is kept. No buttons is a valid answer. A failed lookup
/// is logged and collapsed into one [`FlowError::LoadFailed`]; it is not
/// retried.
pub async fn lookup_buttons(
    api: &dyn StaffingApi,
    booth_code: &str,
) -> Result<Vec<ReportButtonConfig>, FlowError> {
    let booth_code = normalize_booth_code(booth_code);
    if booth_code.is_empty() {
        return Err(CoreError::Validation("booth code must not be empty".into()).into());
    }

    match api.get_report_buttons_for_booth(&booth_code).await {
        Ok(buttons) => {
            tracing::debug!(%booth_code, count = buttons.len(), "Report actions loaded");
            Ok(buttons)
        }
        Err(e) => {
            tracing::error!(%booth_code, error = %e, "Failed to load report actions");
            Err(FlowError::LoadFailed(LOAD_ACTIONS_FAILED.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use boothlog_client::{ApiOperation, InMemoryStaffingApi};
    use boothlog_core::models::{ParticipantCompany, ReportKind};

    use super::*;

    fn api() -> InMemoryStaffingApi {
        InMemoryStaffingApi::new()
            .with_company(
                "E1",
                ParticipantCompany {
                    id: "c1".into(),
                    name: "Acme".into(),
                    booth_code: "B1".into(),
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
    async fn returns_buttons_for_booth() {
        let buttons = lookup_buttons(&api(), "b1").await.unwrap();
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].label, "Feedback");
    }

    #[tokio::test]
    async fn unknown_booth_is_an_empty_catalog() {
        let buttons = lookup_buttons(&api(), "ZZ").await.unwrap();
        assert!(buttons.is_empty());
    }

    #[tokio::test]
    async fn blank_booth_code_is_rejected_without_a_call() {
        let api = api();
        assert_matches!(
            lookup_buttons(&api, "  ").await,
            Err(FlowError::Invalid(CoreError::Validation(_)))
        );
        assert_eq!(api.calls(ApiOperation::GetReportButtons), 0);
    }

    #[tokio::test]
    async fn failure_is_one_load_error_without_retry() {
        let api = api();
        api.fail(ApiOperation::GetReportButtons);
        let err = lookup_buttons(&api, "B1").await.unwrap_err();
        assert_eq!(err.to_string(), LOAD_ACTIONS_FAILED);
        assert_eq!(api.calls(ApiOperation::GetReportButtons), 1);
    }
}
