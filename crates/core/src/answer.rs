//! Answer validation and response composition for report actions.
//!
//! An answer is kept structured ([`ReportAnswer`]) while it is being edited
//! and is folded into the backend's single `response` string only by
//! [`compose_response`]. With an active follow-up the stored string is
//! `"<primary> - <follow-up question>: <follow-up answer>"`.

use crate::models::{AnswerShape, FollowUp, ReportKind};

/// Separator between the primary answer and the follow-up part.
pub const FOLLOW_UP_SEPARATOR: &str = " - ";

/// The answer being composed for one report action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportAnswer {
    pub primary: String,
    pub follow_up: Option<String>,
}

impl ReportAnswer {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            follow_up: None,
        }
    }

    pub fn with_follow_up(mut self, follow_up: impl Into<String>) -> Self {
        self.follow_up = Some(follow_up.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("A resposta não pode ficar em branco.")]
    EmptyText,

    #[error("Selecione uma opção.")]
    MissingChoice,

    #[error("'{0}' não é uma das opções disponíveis.")]
    NotAnOption(String),

    #[error("Responda também: {0}")]
    FollowUpRequired(String),
}

/// The follow-up question that `primary` unlocks, if any.
pub fn active_follow_up<'a>(kind: &'a ReportKind, primary: &str) -> Option<&'a FollowUp> {
    kind.follow_up().filter(|f| f.trigger_value == primary)
}

/// Check `value` against the input `shape` accepts.
pub fn validate_shape(shape: &AnswerShape, value: &str) -> Result<(), AnswerError> {
    match shape {
        AnswerShape::FreeText => {
            if value.trim().is_empty() {
                return Err(AnswerError::EmptyText);
            }
            Ok(())
        }
        AnswerShape::SingleChoice(options) => {
            if value.is_empty() {
                return Err(AnswerError::MissingChoice);
            }
            if options.iter().any(|o| o.label == value) {
                Ok(())
            } else {
                Err(AnswerError::NotAnOption(value.to_string()))
            }
        }
    }
}

/// Validate `answer` for `kind` and build the response string to submit.
///
/// A follow-up answer is only used when the primary answer triggers it;
/// otherwise it is ignored.
pub fn compose_response(kind: &ReportKind, answer: &ReportAnswer) -> Result<String, AnswerError> {
    validate_shape(&kind.primary_shape(), &answer.primary)?;

    let Some(follow_up) = active_follow_up(kind, &answer.primary) else {
        return Ok(answer.primary.clone());
    };

    let follow_up_answer = answer.follow_up.as_deref().unwrap_or_default();
    validate_shape(&follow_up.shape, follow_up_answer).map_err(|e| match e {
        AnswerError::EmptyText | AnswerError::MissingChoice => {
            AnswerError::FollowUpRequired(follow_up.question.clone())
        }
        other => other,
    })?;

    Ok(format!(
        "{}{FOLLOW_UP_SEPARATOR}{}: {}",
        answer.primary, follow_up.question, follow_up_answer
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
