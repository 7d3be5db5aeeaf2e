//! Dashboard joins: staff with their activity log, companies with the
//! reports filed at their booth.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{ParticipantCompany, ReportSubmission, Staff, StaffActivity};
use crate::search::{filter_companies, filter_staff};
use crate::types::EntityId;

/// Which join the dashboard shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    ByStaff,
    ByCompany,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::ByStaff => ViewMode::ByCompany,
            ViewMode::ByCompany => ViewMode::ByStaff,
        }
    }
}

/// One staff member and their activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffCard<'a> {
    pub staff: &'a Staff,
    pub activities: &'a [StaffActivity],
}

/// One participant company and the reports filed at its booth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyCard<'a> {
    pub company: &'a ParticipantCompany,
    pub reports: Vec<&'a ReportSubmission>,
}

/// Sort reports newest first. The sort is stable, so equal timestamps keep
/// their fetch order.
pub fn sort_reports_newest_first(reports: &mut [ReportSubmission]) {
    reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Reports whose booth code equals `booth_code` exactly.
pub fn reports_for_booth<'a>(
    reports: &'a [ReportSubmission],
    booth_code: &str,
) -> Vec<&'a ReportSubmission> {
    reports.iter().filter(|r| r.booth_code == booth_code).collect()
}

/// Pair each staff member matching `term` with their activity log.
///
/// Staff without a fetched log get an empty one.
pub fn staff_cards<'a>(
    staff: &'a [Staff],
    activities: &'a HashMap<EntityId, Vec<StaffActivity>>,
    term: &str,
) -> Vec<StaffCard<'a>> {
    filter_staff(staff, term)
        .into_iter()
        .map(|s| StaffCard {
            staff: s,
            activities: activities.get(&s.id).map(Vec::as_slice).unwrap_or_default(),
        })
        .collect()
}

/// Pair each company matching `term` with its booth's reports.
pub fn company_cards<'a>(
    companies: &'a [ParticipantCompany],
    reports: &'a [ReportSubmission],
    term: &str,
) -> Vec<CompanyCard<'a>> {
    filter_companies(companies, term)
        .into_iter()
        .map(|c| CompanyCard {
            company: c,
            reports: reports_for_booth(reports, &c.booth_code),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn report(id: &str, booth: &str, minute: u32) -> ReportSubmission {
        ReportSubmission {
            id: id.into(),
            event_id: "E1".into(),
            booth_code: booth.into(),
            staff_name: "Ana".into(),
            report_label: "Feedback".into(),
            response: "ok".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 10, 12, minute, 0).unwrap(),
        }
    }

    fn company(id: &str, name: &str, booth: &str) -> ParticipantCompany {
        ParticipantCompany {
            id: id.into(),
            name: name.into(),
            booth_code: booth.into(),
        }
    }

    #[test]
    fn sort_orders_newest_first() {
        let mut reports = vec![report("a", "C1", 1), report("b", "C1", 30), report("c", "C1", 15)];
        sort_reports_newest_first(&mut reports);
        let ids: Vec<_> = reports.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn sort_keeps_fetch_order_on_ties() {
        let mut reports = vec![report("x", "C1", 5), report("y", "C1", 9), report("z", "C1", 5)];
        sort_reports_newest_first(&mut reports);
        let ids: Vec<_> = reports.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["y", "x", "z"]);
    }

    #[test]
    fn company_card_joins_on_exact_booth_code() {
        let companies = vec![company("c1", "Acme", "C1")];
        let reports = vec![report("r1", "C1", 1), report("r2", "C2", 2), report("r3", "c1", 3)];
        let cards = company_cards(&companies, &reports, "");
        assert_eq!(cards.len(), 1);
        let ids: Vec<_> = cards[0].reports.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["r1"]);
    }

    #[test]
    fn company_cards_apply_search() {
        let companies = vec![company("c1", "Acme", "C1"), company("c2", "Globex", "C2")];
        let cards = company_cards(&companies, &[], "glo");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].company.name, "Globex");
        assert!(cards[0].reports.is_empty());
    }

    #[test]
    fn staff_without_log_gets_empty_activities() {
        let staff = vec![Staff {
            id: "s1".into(),
            name: "Ana".into(),
            personal_code: "A1".into(),
            department_id: None,
            photo_url: None,
        }];
        let activities = HashMap::new();
        let cards = staff_cards(&staff, &activities, "");
        assert_eq!(cards.len(), 1);
        assert!(cards[0].activities.is_empty());
    }

    #[test]
    fn view_mode_toggles() {
        assert_eq!(ViewMode::default(), ViewMode::ByStaff);
        assert_eq!(ViewMode::ByStaff.toggled(), ViewMode::ByCompany);
        assert_eq!(ViewMode::ByCompany.toggled(), ViewMode::ByStaff);
    }
}
