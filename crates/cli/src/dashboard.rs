//! Organizer commands: dashboard listing and PDF exports.

use std::path::PathBuf;

use boothlog_client::StaffingApi;
use boothlog_core::aggregate::ViewMode;
use boothlog_core::export::{format_date_time, format_day_time};
use boothlog_flows::export::{company_report, staff_report, write_export};
use boothlog_flows::{Dashboard, PdfTableRenderer};
use chrono::FixedOffset;
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ViewArg {
    #[default]
    Staff,
    Company,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Staff => ViewMode::ByStaff,
            ViewArg::Company => ViewMode::ByCompany,
        }
    }
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Event id
    #[arg(short, long)]
    pub event: String,

    /// Group by staff member or by participant company
    #[arg(long = "by", value_enum, default_value_t = ViewArg::Staff)]
    pub view: ViewArg,

    /// Case-insensitive filter on name or code
    #[arg(short, long, default_value = "")]
    pub search: String,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Event id
    #[arg(short, long)]
    pub event: String,

    /// Personal code (staff export) or booth code (company export)
    pub code: String,

    /// Output directory, overriding BOOTHLOG_EXPORT_DIR
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

pub async fn show(
    api: &dyn StaffingApi,
    args: DashboardArgs,
    offset: &FixedOffset,
) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::load(api, args.event.as_str()).await;
    dashboard.set_view_mode(args.view.into());
    dashboard.set_search_term(args.search);

    print_header(&dashboard);
    match dashboard.view_mode() {
        ViewMode::ByStaff => print_staff(&dashboard, offset),
        ViewMode::ByCompany => print_companies(&dashboard, offset),
    }
    Ok(())
}

pub async fn export_staff(
    api: &dyn StaffingApi,
    args: ExportArgs,
    export_dir: PathBuf,
    offset: &FixedOffset,
) -> anyhow::Result<()> {
    let dashboard = Dashboard::load(api, args.event.as_str()).await;
    let table = staff_report(&dashboard, &args.code, offset)?;
    let path = write_export(&PdfTableRenderer::new(), &table, &args.out.unwrap_or(export_dir))?;
    println!("{}", path.display());
    Ok(())
}

pub async fn export_company(
    api: &dyn StaffingApi,
    args: ExportArgs,
    export_dir: PathBuf,
    offset: &FixedOffset,
) -> anyhow::Result<()> {
    let dashboard = Dashboard::load(api, args.event.as_str()).await;
    let table = company_report(&dashboard, &args.code, offset)?;
    let path = write_export(&PdfTableRenderer::new(), &table, &args.out.unwrap_or(export_dir))?;
    println!("{}", path.display());
    Ok(())
}

fn print_header(dashboard: &Dashboard) {
    match (dashboard.event(), dashboard.organizer()) {
        (Some(event), Some(organizer)) => println!("{} | {}", event.name, organizer.name),
        (Some(event), None) => println!("{}", event.name),
        (None, _) => println!("Evento {} não encontrado.", dashboard.event_id()),
    }
    if let Some(error) = dashboard.last_error() {
        println!("Atenção: dados incompletos ({error}).");
    }
}

fn print_staff(dashboard: &Dashboard, offset: &FixedOffset) {
    let cards = dashboard.staff_cards();
    if cards.is_empty() {
        println!("Nenhum membro da equipe encontrado.");
    }
    for card in cards {
        println!();
        println!("{} ({})", card.staff.name, card.staff.personal_code);
        if card.activities.is_empty() {
            println!("    Nenhuma atividade registrada.");
        }
        for activity in card.activities {
            println!(
                "    {}  {}",
                format_day_time(&activity.timestamp, offset),
                activity.description
            );
        }
    }
}

fn print_companies(dashboard: &Dashboard, offset: &FixedOffset) {
    let cards = dashboard.company_cards();
    if cards.is_empty() {
        println!("Nenhuma empresa encontrada.");
    }
    for card in cards {
        println!();
        println!("{} (estande {})", card.company.name, card.company.booth_code);
        if card.reports.is_empty() {
            println!("    Nenhum registro.");
        }
        for report in card.reports {
            println!(
                "    {}  {}: \"{}\" ({})",
                format_date_time(&report.timestamp, offset),
                report.report_label,
                report.response,
                report.staff_name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_arg_maps_to_view_mode() {
        assert_eq!(ViewMode::from(ViewArg::Staff), ViewMode::ByStaff);
        assert_eq!(ViewMode::from(ViewArg::Company), ViewMode::ByCompany);
    }
}
