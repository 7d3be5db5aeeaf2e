//! Organizer dashboard end to end: load chain, ordering, projections,
//! search and PDF export.

mod common;

use boothlog_client::ApiOperation;
use boothlog_core::aggregate::ViewMode;
use boothlog_flows::export::{company_report, staff_report, write_export};
use boothlog_flows::{Dashboard, PdfTableRenderer};
use chrono::FixedOffset;

fn brasilia() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).unwrap()
}

// ---------------------------------------------------------------------------
// Load and ordering
// ---------------------------------------------------------------------------

/// Event `E1` with one company `C1` and reports at `C1` and `C2`: the `C1`
/// card holds exactly one report.
#[tokio::test]
async fn company_card_only_holds_its_booth_reports() {
    let api = common::backend()
        .with_company("E1", common::company("c3", "Gama", "C1"))
        .with_report(common::report("r1", "C1", 0, "ok"))
        .with_report(common::report("r2", "C2", 1, "ok"));

    let mut dashboard = Dashboard::load(&api, "E1").await;
    dashboard.set_view_mode(ViewMode::ByCompany);
    dashboard.set_search_term("C1");

    let cards = dashboard.company_cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].reports.len(), 1);
    assert_eq!(cards[0].reports[0].id, "r1");
}

/// Reports come back newest first whatever order the backend used; ties
/// keep fetch order.
#[tokio::test]
async fn reports_sorted_newest_first() {
    let api = common::backend()
        .with_report(common::report("early", "B1", 5, "a"))
        .with_report(common::report("late", "B1", 30, "b"))
        .with_report(common::report("tie-1", "B1", 10, "c"))
        .with_report(common::report("tie-2", "B1", 10, "d"));

    let dashboard = Dashboard::load(&api, "E1").await;
    let ids: Vec<&str> = dashboard.reports().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["late", "tie-1", "tie-2", "early"]);
}

/// One activity request per staff member, results matched by staff id.
#[tokio::test]
async fn activities_fetched_per_staff_member() {
    let api = common::backend();
    let dashboard = Dashboard::load(&api, "E1").await;

    assert_eq!(api.calls(ApiOperation::GetStaffActivity), 2);
    assert_eq!(dashboard.activities_of("s1").len(), 1);
    assert!(dashboard.activities_of("s2").is_empty());
}

/// A failing report fetch leaves the event and organizer in place.
#[tokio::test]
async fn partial_state_survives_failure() {
    let api = common::backend();
    api.fail(ApiOperation::GetReports);
    let dashboard = Dashboard::load(&api, "E1").await;

    assert!(dashboard.event().is_some());
    assert!(dashboard.organizer().is_some());
    assert!(dashboard.reports().is_empty());
    assert_eq!(dashboard.last_error(), Some("Serviço indisponível."));
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn staff_search_matches_name_or_code_case_insensitively() {
    let api = common::backend();
    let mut dashboard = Dashboard::load(&api, "E1").await;

    dashboard.set_search_term("ana");
    let names: Vec<&str> = dashboard.staff_cards().iter().map(|c| c.staff.name.as_str()).collect();
    assert_eq!(names, vec!["Ana"]);

    dashboard.set_search_term("b7");
    let names: Vec<&str> = dashboard.staff_cards().iter().map(|c| c.staff.name.as_str()).collect();
    assert_eq!(names, vec!["Bruno"]);

    dashboard.set_search_term("");
    assert_eq!(dashboard.staff_cards().len(), 2);
}

#[tokio::test]
async fn company_search_matches_name_or_booth() {
    let api = common::backend();
    let mut dashboard = Dashboard::load(&api, "E1").await;

    dashboard.set_search_term("bet");
    assert_eq!(dashboard.company_cards()[0].company.name, "Beta");

    dashboard.set_search_term("b1");
    assert_eq!(dashboard.company_cards()[0].company.name, "Acme");

    dashboard.set_search_term("zzz");
    assert!(dashboard.company_cards().is_empty());
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[tokio::test]
async fn staff_export_is_named_by_personal_code() {
    let api = common::backend();
    let dashboard = Dashboard::load(&api, "E1").await;

    let table = staff_report(&dashboard, "A1", &brasilia()).unwrap();
    assert_eq!(table.subtitle, "Evento: Feira de Negócios");
    assert_eq!(table.rows[0][1], "10/05/2024, 09:00:00");

    let dir = tempfile::tempdir().unwrap();
    let path = write_export(&PdfTableRenderer::new(), &table, dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "relatorio_equipe_A1.pdf");
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
}

#[tokio::test]
async fn company_export_lists_booth_reports() {
    let api = common::backend()
        .with_report(common::report("r1", "B1", 0, "Tudo ótimo"))
        .with_report(common::report("r2", "B2", 1, "Outro estande"));
    let dashboard = Dashboard::load(&api, "E1").await;

    let table = company_report(&dashboard, "B1", &brasilia()).unwrap();
    assert_eq!(table.file_name, "relatorio_empresa_B1.pdf");
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0][1], "\"Tudo ótimo\"");
}
