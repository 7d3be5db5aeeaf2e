//! REST client for the staffing backend.
//!
//! Successful responses carry a `{ "data": ... }` envelope; failures carry
//! `{ "error": "<message>", "code": "<CODE>" }`. The error message is kept
//! as-is so it can be shown to the user.

use std::time::Duration;

use async_trait::async_trait;
use boothlog_core::error::CoreError;
use boothlog_core::models::{
    CheckinRequest, CheckinValidation, Event, NewReportSubmission, OrganizerCompany,
    ParticipantCompany, ReportButtonConfig, ReportSubmission, Staff, StaffActivity,
};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use validator::Validate;

use crate::api::StaffingApi;
use crate::config::ClientConfig;
use crate::error::ApiError;

/// `{ "data": T }` response envelope.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// `{ "error": ..., "code": ... }` error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    code: Option<String>,
}

/// HTTP client for one staffing backend.
#[derive(Debug)]
pub struct HttpStaffingApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpStaffingApi {
    /// Build a client from configuration.
    ///
    /// Fails if the base URL does not parse or cannot carry a path.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Self::with_client(client, &config.api_url)
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: &str) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(api_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{api_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(api_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    // ---- private helpers ----

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_data<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        Self::parse_data(response).await
    }

    /// Ensure the response has a success status code. On failure the
    /// backend's error message is extracted from the body when present.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let (code, message) = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => (parsed.code, parsed.error),
            Err(_) if body.trim().is_empty() => (
                None,
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected response")
                    .to_string(),
            ),
            Err(_) => (None, body),
        };
        tracing::warn!(status = status.as_u16(), ?code, %message, "Backend returned an error");
        Err(ApiError::Backend {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn parse_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let envelope = response.json::<DataEnvelope<T>>().await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl StaffingApi for HttpStaffingApi {
    async fn get_events(&self) -> Result<Vec<Event>, ApiError> {
        self.get_data(&["events"]).await
    }

    async fn get_organizer_company_by_id(&self, id: &str) -> Result<OrganizerCompany, ApiError> {
        self.get_data(&["organizers", id]).await
    }

    async fn get_staff_by_organizer(&self, organizer_id: &str) -> Result<Vec<Staff>, ApiError> {
        self.get_data(&["organizers", organizer_id, "staff"]).await
    }

    async fn get_staff_activity(&self, staff_id: &str) -> Result<Vec<StaffActivity>, ApiError> {
        self.get_data(&["staff", staff_id, "activity"]).await
    }

    async fn get_participant_companies_by_event(
        &self,
        event_id: &str,
    ) -> Result<Vec<ParticipantCompany>, ApiError> {
        self.get_data(&["events", event_id, "companies"]).await
    }

    async fn get_reports_by_event(&self, event_id: &str) -> Result<Vec<ReportSubmission>, ApiError> {
        self.get_data(&["events", event_id, "reports"]).await
    }

    async fn get_report_buttons_for_booth(
        &self,
        booth_code: &str,
    ) -> Result<Vec<ReportButtonConfig>, ApiError> {
        self.get_data(&["booths", booth_code, "report-buttons"]).await
    }

    async fn submit_report(&self, report: &NewReportSubmission) -> Result<(), ApiError> {
        report.validate().map_err(CoreError::from)?;

        let url = self.endpoint(&["reports"])?;
        tracing::debug!(%url, booth_code = %report.booth_code, label = %report.report_label, "POST report");
        let response = self.client.post(url).json(report).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn validate_checkin(
        &self,
        booth_code: &str,
        personal_code: &str,
    ) -> Result<CheckinValidation, ApiError> {
        let request = CheckinRequest {
            booth_code: booth_code.to_string(),
            personal_code: personal_code.to_string(),
        };
        request.validate().map_err(CoreError::from)?;

        let url = self.endpoint(&["checkin", "validate"])?;
        tracing::debug!(%url, booth_code, "POST checkin validation");
        let response = self.client.post(url).json(&request).send().await?;
        Self::parse_data(response).await
    }
}
