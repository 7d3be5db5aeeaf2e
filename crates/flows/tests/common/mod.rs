//! Shared fixture: event `E1` run by organizer `O1`, with Ana (`A1`, `D1`)
//! and Bruno (`B7`, `D2`) on staff.

#![allow(dead_code)]

use boothlog_client::InMemoryStaffingApi;
use boothlog_core::models::{
    AnswerShape, Event, FollowUp, OrganizerCompany, ParticipantCompany, ReportButtonConfig,
    ReportKind, ReportSubmission, Staff, StaffActivity, YES_LABEL,
};
use chrono::{TimeZone, Utc};

pub fn staff(id: &str, name: &str, code: &str, dept: &str) -> Staff {
    Staff {
        id: id.into(),
        name: name.into(),
        personal_code: code.into(),
        department_id: Some(dept.into()),
        photo_url: None,
    }
}

pub fn company(id: &str, name: &str, booth: &str) -> ParticipantCompany {
    ParticipantCompany {
        id: id.into(),
        name: name.into(),
        booth_code: booth.into(),
    }
}

pub fn report(id: &str, booth: &str, minute: u32, response: &str) -> ReportSubmission {
    ReportSubmission {
        id: id.into(),
        event_id: "E1".into(),
        booth_code: booth.into(),
        staff_name: "Ana".into(),
        report_label: "Feedback".into(),
        response: response.into(),
        timestamp: Utc.with_ymd_and_hms(2024, 5, 10, 12, minute, 0).unwrap(),
    }
}

pub fn feedback_button() -> ReportButtonConfig {
    ReportButtonConfig {
        id: "b-feedback".into(),
        label: "Feedback".into(),
        question: "Como está o estande?".into(),
        kind: ReportKind::OpenText,
        department_id: None,
    }
}

pub fn problem_button(dept: Option<&str>) -> ReportButtonConfig {
    ReportButtonConfig {
        id: "b-problem".into(),
        label: "Problema?".into(),
        question: "Houve algum problema?".into(),
        kind: ReportKind::YesNo {
            follow_up: Some(FollowUp {
                question: "Qual?".into(),
                trigger_value: YES_LABEL.into(),
                shape: AnswerShape::FreeText,
            }),
        },
        department_id: dept.map(Into::into),
    }
}

/// Backend with the booth `B1` catalog: Feedback for everyone and a
/// YES_NO "Problema?" scoped to department `D2`.
pub fn backend() -> InMemoryStaffingApi {
    InMemoryStaffingApi::new()
        .with_event(Event {
            id: "E1".into(),
            name: "Feira de Negócios".into(),
            organizer_company_id: "O1".into(),
        })
        .with_organizer(OrganizerCompany {
            id: "O1".into(),
            name: "Organiza Eventos".into(),
        })
        .with_staff("O1", staff("s1", "Ana", "A1", "D1"))
        .with_staff("O1", staff("s2", "Bruno", "B7", "D2"))
        .with_activity(
            "s1",
            StaffActivity {
                id: "a1".into(),
                description: "Check-in no estande B1".into(),
                timestamp: Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap(),
            },
        )
        .with_company("E1", company("c1", "Acme", "B1"))
        .with_company("E1", company("c2", "Beta", "B2"))
        .with_button("E1", feedback_button())
        .with_button("E1", problem_button(Some("D2")))
}
