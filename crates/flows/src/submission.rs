//! Report Submission Flow: the modal opened by one report action.
//!
//! ```text
//! Idle ──open──▶ Composing ──begin_submit──▶ Submitting ──ok──▶ Submitted
//!   ▲               ▲   │                        │                 │
//!   │               │   └──dismiss──▶ Idle       └──err──▶ Composing (failed)
//!   └──────────── close_after_success / dismiss ◀──────────────────┘
//! ```

use std::time::Duration;

use boothlog_client::{ApiError, StaffingApi};
use boothlog_core::answer::{active_follow_up, compose_response, AnswerError, ReportAnswer};
use boothlog_core::models::{CheckinInfo, FollowUp, NewReportSubmission, ReportButtonConfig};

/// How long the success indicator stays up before the modal closes.
pub const SUCCESS_DISPLAY_DELAY: Duration = Duration::from_millis(1500);

/// Inline message shown in the modal after a failed submission.
pub const SUBMIT_FAILED: &str = "Falha ao enviar o informe.";

/// Message shown while the modal is in [`ModalState::Submitted`].
pub const SUBMIT_SUCCEEDED: &str = "Informe enviado com sucesso!";

/// Answer being edited for one button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub button: ReportButtonConfig,
    pub answer: ReportAnswer,
    /// Set when the last submission attempt failed.
    pub failed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Idle,
    Composing(Draft),
    /// Request in flight; the form is disabled.
    Submitting(Draft),
    Submitted {
        button: ReportButtonConfig,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ModalError {
    #[error("Nenhum informe aberto.")]
    NotComposing,

    #[error("Aguarde o envio do informe.")]
    Busy,

    #[error("Esta pergunta não se aplica à resposta escolhida.")]
    FollowUpInactive,

    #[error(transparent)]
    Answer(#[from] AnswerError),

    /// The backend call failed. The underlying error is logged; the user
    /// only sees the generic message.
    #[error("Falha ao enviar o informe.")]
    Submit(#[source] ApiError),
}

/// Who is reporting and where, taken from the session.
#[derive(Debug, Clone, Copy)]
pub struct SubmitContext<'a> {
    pub session: &'a CheckinInfo,
    pub booth_code: &'a str,
}

/// One modal per booth page.
#[derive(Debug, Default)]
pub struct ReportModal {
    state: ModalState,
}

impl ReportModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, ModalState::Idle)
    }

    /// The draft being edited, if the form is editable.
    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            ModalState::Composing(draft) => Some(draft),
            _ => None,
        }
    }

    /// Start a fresh answer for `button`, replacing any open form.
    pub fn open(&mut self, button: ReportButtonConfig) -> Result<(), ModalError> {
        if matches!(self.state, ModalState::Submitting(_)) {
            return Err(ModalError::Busy);
        }
        tracing::debug!(button_id = %button.id, label = %button.label, "Report modal opened");
        self.state = ModalState::Composing(Draft {
            button,
            answer: ReportAnswer::default(),
            failed: false,
        });
        Ok(())
    }

    fn composing_mut(&mut self) -> Result<&mut Draft, ModalError> {
        match &mut self.state {
            ModalState::Composing(draft) => Ok(draft),
            ModalState::Submitting(_) => Err(ModalError::Busy),
            ModalState::Idle | ModalState::Submitted { .. } => Err(ModalError::NotComposing),
        }
    }

    /// Set the primary answer. Moving away from the follow-up trigger
    /// clears the follow-up answer.
    pub fn set_primary(&mut self, value: impl Into<String>) -> Result<(), ModalError> {
        let draft = self.composing_mut()?;
        draft.answer.primary = value.into();
        if active_follow_up(&draft.button.kind, &draft.answer.primary).is_none() {
            draft.answer.follow_up = None;
        }
        Ok(())
    }

    /// Set the follow-up answer. Only allowed while the follow-up is shown.
    pub fn set_follow_up(&mut self, value: impl Into<String>) -> Result<(), ModalError> {
        let draft = self.composing_mut()?;
        if active_follow_up(&draft.button.kind, &draft.answer.primary).is_none() {
            return Err(ModalError::FollowUpInactive);
        }
        draft.answer.follow_up = Some(value.into());
        Ok(())
    }

    /// The follow-up question currently shown, if any.
    pub fn follow_up(&self) -> Option<&FollowUp> {
        let draft = self.draft()?;
        active_follow_up(&draft.button.kind, &draft.answer.primary)
    }

    /// Whether the last attempt failed and the failure message is shown.
    pub fn last_submit_failed(&self) -> bool {
        self.draft().is_some_and(|d| d.failed)
    }

    /// Validate the draft and move to `Submitting`, returning the payload
    /// to send. A validation failure leaves the form as it was.
    pub fn begin_submit(&mut self, ctx: SubmitContext<'_>) -> Result<NewReportSubmission, ModalError> {
        let draft = self.composing_mut()?;
        let response = compose_response(&draft.button.kind, &draft.answer)?;
        let payload = NewReportSubmission {
            event_id: ctx.session.event_id.clone(),
            booth_code: ctx.booth_code.to_string(),
            staff_name: ctx.session.staff_name.clone(),
            report_label: draft.button.label.clone(),
            response,
        };

        if let ModalState::Composing(draft) = std::mem::take(&mut self.state) {
            self.state = ModalState::Submitting(draft);
        }
        Ok(payload)
    }

    /// Apply the outcome of the request started by [`begin_submit`](Self::begin_submit).
    ///
    /// Success shows the confirmation. Failure re-enables the form with the
    /// answer kept and the failure indicator set.
    pub fn finish_submit(&mut self, result: Result<(), ApiError>) -> Result<(), ModalError> {
        if !matches!(self.state, ModalState::Submitting(_)) {
            return Err(ModalError::NotComposing);
        }
        let ModalState::Submitting(mut draft) = std::mem::take(&mut self.state) else {
            return Err(ModalError::NotComposing);
        };

        match result {
            Ok(()) => {
                tracing::info!(label = %draft.button.label, "Report submitted");
                self.state = ModalState::Submitted {
                    button: draft.button,
                };
                Ok(())
            }
            Err(e) => {
                tracing::error!(label = %draft.button.label, error = %e, "Report submission failed");
                draft.failed = true;
                self.state = ModalState::Composing(draft);
                Err(ModalError::Submit(e))
            }
        }
    }

    /// Validate, send one report and record the outcome.
    pub async fn submit(
        &mut self,
        api: &dyn StaffingApi,
        ctx: SubmitContext<'_>,
    ) -> Result<(), ModalError> {
        let payload = self.begin_submit(ctx)?;
        let result = api.submit_report(&payload).await;
        self.finish_submit(result)
    }

    /// Close the modal, discarding the answer.
    ///
    /// Not allowed while a request is in flight.
    pub fn dismiss(&mut self) -> Result<(), ModalError> {
        if matches!(self.state, ModalState::Submitting(_)) {
            return Err(ModalError::Busy);
        }
        self.state = ModalState::Idle;
        Ok(())
    }

    /// Keep the confirmation up for [`SUCCESS_DISPLAY_DELAY`], then close.
    ///
    /// Does nothing unless the modal is in `Submitted`.
    pub async fn close_after_success(&mut self) {
        if !matches!(self.state, ModalState::Submitted { .. }) {
            return;
        }
        tokio::time::sleep(SUCCESS_DISPLAY_DELAY).await;
        if matches!(self.state, ModalState::Submitted { .. }) {
            self.state = ModalState::Idle;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
