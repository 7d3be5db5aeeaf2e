//! Tabular projections for the per-staff and per-company PDF reports.
//!
//! These functions only shape data; rendering the table into a document is
//! the caller's concern.

use chrono::FixedOffset;

use crate::models::{ParticipantCompany, ReportSubmission, Staff, StaffActivity};
use crate::types::Timestamp;

/// Placeholder used when the event name is unknown.
const UNKNOWN_EVENT: &str = "N/A";

/// A titled table ready to be rendered, with its output file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub title: String,
    pub subtitle: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub file_name: String,
}

/// Full date and time, e.g. `10/05/2024, 09:30:00`.
pub fn format_timestamp(ts: &Timestamp, offset: &FixedOffset) -> String {
    ts.with_timezone(offset).format("%d/%m/%Y, %H:%M:%S").to_string()
}

/// Day, month and time without seconds, e.g. `10/05, 09:30`.
pub fn format_day_time(ts: &Timestamp, offset: &FixedOffset) -> String {
    ts.with_timezone(offset).format("%d/%m, %H:%M").to_string()
}

/// Date and time without seconds, e.g. `10/05/2024, 09:30`.
pub fn format_date_time(ts: &Timestamp, offset: &FixedOffset) -> String {
    ts.with_timezone(offset).format("%d/%m/%Y, %H:%M").to_string()
}

pub fn staff_file_name(staff: &Staff) -> String {
    format!("relatorio_equipe_{}.pdf", file_safe(&staff.personal_code))
}

pub fn company_file_name(company: &ParticipantCompany) -> String {
    format!("relatorio_empresa_{}.pdf", file_safe(&company.booth_code))
}

/// Backend codes end up in file names; anything that could act as a path
/// separator or is rejected by common filesystems becomes `_`.
fn file_safe(code: &str) -> String {
    code.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn event_subtitle(event_name: Option<&str>) -> String {
    format!("Evento: {}", event_name.unwrap_or(UNKNOWN_EVENT))
}

/// Two-column activity log of one staff member.
pub fn staff_activity_table(
    event_name: Option<&str>,
    staff: &Staff,
    activities: &[StaffActivity],
    offset: &FixedOffset,
) -> ExportTable {
    ExportTable {
        title: format!("Relatório de Atividades: {}", staff.name),
        subtitle: event_subtitle(event_name),
        columns: vec!["Descrição".to_string(), "Data/Hora".to_string()],
        rows: activities
            .iter()
            .map(|a| vec![a.description.clone(), format_timestamp(&a.timestamp, offset)])
            .collect(),
        file_name: staff_file_name(staff),
    }
}

/// Four-column report list of one company. Responses are quoted.
pub fn company_report_table<'a>(
    event_name: Option<&str>,
    company: &ParticipantCompany,
    reports: impl IntoIterator<Item = &'a ReportSubmission>,
    offset: &FixedOffset,
) -> ExportTable {
    ExportTable {
        title: format!("Relatório de Registros: {}", company.name),
        subtitle: event_subtitle(event_name),
        columns: ["Ação", "Resposta", "Equipe", "Data/Hora"]
            .map(String::from)
            .to_vec(),
        rows: reports
            .into_iter()
            .map(|r| {
                vec![
                    r.report_label.clone(),
                    format!("\"{}\"", r.response),
                    r.staff_name.clone(),
                    format_timestamp(&r.timestamp, offset),
                ]
            })
            .collect(),
        file_name: company_file_name(company),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn brt() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    fn ana() -> Staff {
        Staff {
            id: "s1".into(),
            name: "Ana".into(),
            personal_code: "A1".into(),
            department_id: Some("D1".into()),
            photo_url: None,
        }
    }

    #[test]
    fn timestamps_render_in_offset() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 10, 12, 30, 5).unwrap();
        assert_eq!(format_timestamp(&ts, &brt()), "10/05/2024, 09:30:05");
        assert_eq!(format_day_time(&ts, &brt()), "10/05, 09:30");
        assert_eq!(format_date_time(&ts, &brt()), "10/05/2024, 09:30");
    }

    #[test]
    fn staff_table_has_two_columns_and_named_file() {
        let activities = vec![StaffActivity {
            id: "a1".into(),
            description: "Check-in no estande B1".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap(),
        }];
        let table = staff_activity_table(Some("Feira"), &ana(), &activities, &brt());
        assert_eq!(table.title, "Relatório de Atividades: Ana");
        assert_eq!(table.subtitle, "Evento: Feira");
        assert_eq!(table.columns, ["Descrição", "Data/Hora"]);
        assert_eq!(table.rows, vec![vec![
            "Check-in no estande B1".to_string(),
            "10/05/2024, 09:00:00".to_string(),
        ]]);
        assert_eq!(table.file_name, "relatorio_equipe_A1.pdf");
    }

    #[test]
    fn company_table_quotes_responses() {
        let company = ParticipantCompany {
            id: "c1".into(),
            name: "Acme".into(),
            booth_code: "C1".into(),
        };
        let reports = vec![ReportSubmission {
            id: "r1".into(),
            event_id: "E1".into(),
            booth_code: "C1".into(),
            staff_name: "Ana".into(),
            report_label: "Feedback".into(),
            response: "Tudo ótimo".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 10, 15, 0, 0).unwrap(),
        }];
        let table = company_report_table(None, &company, &reports, &brt());
        assert_eq!(table.subtitle, "Evento: N/A");
        assert_eq!(table.columns.len(), 4);
        assert_eq!(table.rows[0][1], "\"Tudo ótimo\"");
        assert_eq!(table.rows[0][2], "Ana");
        assert_eq!(table.file_name, "relatorio_empresa_C1.pdf");
    }

    #[test]
    fn codes_with_separators_stay_in_one_file_name() {
        let mut staff = ana();
        staff.personal_code = "A/1".into();
        assert_eq!(staff_file_name(&staff), "relatorio_equipe_A_1.pdf");

        let company = ParticipantCompany {
            id: "c1".into(),
            name: "Acme".into(),
            booth_code: "..\\C:1".into(),
        };
        assert_eq!(company_file_name(&company), "relatorio_empresa_.._C_1.pdf");
    }
}
