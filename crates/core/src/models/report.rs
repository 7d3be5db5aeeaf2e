//! Report action configuration and report submission models.
//!
//! The backend describes a report action with a string `type` tag plus
//! loosely related optional fields (`options`, `followUp`). On decode this is
//! folded into the closed [`ReportKind`] variant so callers dispatch with an
//! exhaustive `match` instead of comparing tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Affirmative label of a yes/no question.
pub const YES_LABEL: &str = "Sim";

/// Negative label of a yes/no question.
pub const NO_LABEL: &str = "Não";

// ---------------------------------------------------------------------------
// Type tag
// ---------------------------------------------------------------------------

/// The backend's report type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTypeTag {
    OpenText,
    MultipleChoice,
    YesNo,
}

impl ReportTypeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportTypeTag::OpenText => "OPEN_TEXT",
            ReportTypeTag::MultipleChoice => "MULTIPLE_CHOICE",
            ReportTypeTag::YesNo => "YES_NO",
        }
    }
}

impl FromStr for ReportTypeTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN_TEXT" => Ok(ReportTypeTag::OpenText),
            "MULTIPLE_CHOICE" => Ok(ReportTypeTag::MultipleChoice),
            "YES_NO" => Ok(ReportTypeTag::YesNo),
            other => Err(CoreError::UnknownReportType(other.to_string())),
        }
    }
}

impl fmt::Display for ReportTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// One selectable option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: EntityId,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// The input a question accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerShape {
    /// Any non-empty text.
    FreeText,
    /// Exactly one of the listed option labels.
    SingleChoice(Vec<ChoiceOption>),
}

impl AnswerShape {
    /// The fixed "Sim"/"Não" choice.
    pub fn yes_no() -> Self {
        AnswerShape::SingleChoice(vec![
            ChoiceOption::new("sim", YES_LABEL),
            ChoiceOption::new("nao", NO_LABEL),
        ])
    }
}

/// A nested question asked when the primary yes/no answer equals
/// `trigger_value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUp {
    pub question: String,
    pub trigger_value: String,
    pub shape: AnswerShape,
}

/// What kind of answer a report action collects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportKind {
    OpenText,
    MultipleChoice { options: Vec<ChoiceOption> },
    YesNo { follow_up: Option<FollowUp> },
}

impl ReportKind {
    /// Shape of the primary answer.
    pub fn primary_shape(&self) -> AnswerShape {
        match self {
            ReportKind::OpenText => AnswerShape::FreeText,
            ReportKind::MultipleChoice { options } => AnswerShape::SingleChoice(options.clone()),
            ReportKind::YesNo { .. } => AnswerShape::yes_no(),
        }
    }

    /// The follow-up question, if this kind can carry one.
    pub fn follow_up(&self) -> Option<&FollowUp> {
        match self {
            ReportKind::YesNo { follow_up } => follow_up.as_ref(),
            ReportKind::OpenText | ReportKind::MultipleChoice { .. } => None,
        }
    }

    pub fn tag(&self) -> ReportTypeTag {
        match self {
            ReportKind::OpenText => ReportTypeTag::OpenText,
            ReportKind::MultipleChoice { .. } => ReportTypeTag::MultipleChoice,
            ReportKind::YesNo { .. } => ReportTypeTag::YesNo,
        }
    }
}

/// A report action configured for a booth's event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawReportButton", into = "RawReportButton")]
pub struct ReportButtonConfig {
    pub id: EntityId,
    pub label: String,
    pub question: String,
    pub kind: ReportKind,
    /// `None` means the action is general and visible to every department.
    pub department_id: Option<EntityId>,
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReportButton {
    id: EntityId,
    label: String,
    question: String,
    #[serde(rename = "type")]
    report_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    department_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<ChoiceOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    follow_up: Option<RawFollowUp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFollowUp {
    question: String,
    trigger_value: String,
    #[serde(rename = "type")]
    report_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<ChoiceOption>>,
}

impl TryFrom<RawFollowUp> for FollowUp {
    type Error = CoreError;

    fn try_from(raw: RawFollowUp) -> Result<Self, Self::Error> {
        // Only a listed choice restricts the answer; anything else is free text.
        let shape = match (raw.report_type.parse::<ReportTypeTag>()?, raw.options) {
            (ReportTypeTag::MultipleChoice, Some(options)) if !options.is_empty() => {
                AnswerShape::SingleChoice(options)
            }
            _ => AnswerShape::FreeText,
        };
        Ok(FollowUp {
            question: raw.question,
            trigger_value: raw.trigger_value,
            shape,
        })
    }
}

impl From<FollowUp> for RawFollowUp {
    fn from(follow_up: FollowUp) -> Self {
        let (report_type, options) = match follow_up.shape {
            AnswerShape::FreeText => (ReportTypeTag::OpenText, None),
            AnswerShape::SingleChoice(options) => (ReportTypeTag::MultipleChoice, Some(options)),
        };
        RawFollowUp {
            question: follow_up.question,
            trigger_value: follow_up.trigger_value,
            report_type: report_type.as_str().to_string(),
            options,
        }
    }
}

impl TryFrom<RawReportButton> for ReportButtonConfig {
    type Error = CoreError;

    fn try_from(raw: RawReportButton) -> Result<Self, Self::Error> {
        let kind = match raw.report_type.parse::<ReportTypeTag>()? {
            ReportTypeTag::OpenText => ReportKind::OpenText,
            ReportTypeTag::MultipleChoice => ReportKind::MultipleChoice {
                options: raw.options.unwrap_or_default(),
            },
            ReportTypeTag::YesNo => ReportKind::YesNo {
                follow_up: raw.follow_up.map(FollowUp::try_from).transpose()?,
            },
        };
        // An empty department id means "general".
        let department_id = raw.department_id.filter(|d| !d.is_empty());
        Ok(ReportButtonConfig {
            id: raw.id,
            label: raw.label,
            question: raw.question,
            kind,
            department_id,
        })
    }
}

impl From<ReportButtonConfig> for RawReportButton {
    fn from(button: ReportButtonConfig) -> Self {
        let report_type = button.kind.tag().as_str().to_string();
        let (options, follow_up) = match button.kind {
            ReportKind::OpenText => (None, None),
            ReportKind::MultipleChoice { options } => (Some(options), None),
            ReportKind::YesNo { follow_up } => (None, follow_up.map(RawFollowUp::from)),
        };
        RawReportButton {
            id: button.id,
            label: button.label,
            question: button.question,
            report_type,
            department_id: button.department_id,
            options,
            follow_up,
        }
    }
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

/// A stored, immutable answered report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSubmission {
    pub id: EntityId,
    pub event_id: EntityId,
    pub booth_code: String,
    pub staff_name: String,
    pub report_label: String,
    pub response: String,
    pub timestamp: Timestamp,
}

/// Payload for `POST /reports`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewReportSubmission {
    #[validate(length(min = 1, message = "eventId must not be empty"))]
    pub event_id: EntityId,
    #[validate(length(min = 1, message = "boothCode must not be empty"))]
    pub booth_code: String,
    #[validate(length(min = 1, message = "staffName must not be empty"))]
    pub staff_name: String,
    #[validate(length(min = 1, message = "reportLabel must not be empty"))]
    pub report_label: String,
    #[validate(length(min = 1, message = "response must not be empty"))]
    pub response: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
