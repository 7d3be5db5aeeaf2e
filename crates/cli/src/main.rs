//! `boothlog` -- event staffing from the terminal.
//!
//! Staff check in at a booth, list the report actions offered to them and
//! submit reports. Organizers list an event's staff activity and booth
//! reports and export them as PDF.
//!
//! # Environment variables
//!
//! | Variable                        | Default                         | Description                    |
//! |---------------------------------|---------------------------------|--------------------------------|
//! | `BOOTHLOG_API_URL`              | `http://localhost:3000/api/v1`  | Staffing backend base URL      |
//! | `BOOTHLOG_REQUEST_TIMEOUT_SECS` | `30`                            | Per-request timeout            |
//! | `BOOTHLOG_SESSION_DIR`          | `<system temp>/boothlog-<user>` | Where the check-in is kept     |
//! | `BOOTHLOG_EXPORT_DIR`           | `.`                             | Where PDF exports are written  |
//! | `BOOTHLOG_UTC_OFFSET`           | `-03:00`                        | Offset timestamps are shown in |

mod booth;
mod config;
mod dashboard;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use boothlog_client::{HttpStaffingApi, InMemoryStaffingApi, MemoryFixture, StaffingApi};
use boothlog_flows::{FileSessionStore, FlowError};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "boothlog")]
#[command(about = "Booth check-in, reports and organizer dashboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Serve data from a JSON fixture instead of the backend
    #[arg(long, global = true, value_name = "PATH")]
    fixture: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check in at a booth with your personal code
    Checkin(booth::CheckinArgs),

    /// List the report actions available at your booth
    #[command(alias = "a")]
    Actions,

    /// Submit a report for one action
    #[command(alias = "r")]
    Report(booth::ReportArgs),

    /// Move to another booth, keeping your personal code
    Switch(booth::SwitchArgs),

    /// End the session
    Exit,

    /// Show an event's staff activity or booth reports
    #[command(alias = "d")]
    Dashboard(dashboard::DashboardArgs),

    /// Export one staff member's activity as PDF
    ExportStaff(dashboard::ExportArgs),

    /// Export one company's booth reports as PDF
    ExportCompany(dashboard::ExportArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "boothlog_cli=info,boothlog_flows=info,boothlog_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            if matches!(e.downcast_ref::<FlowError>(), Some(FlowError::NotCheckedIn)) {
                eprintln!("Use `boothlog checkin <ESTANDE> <CÓDIGO PESSOAL>`.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_env()?;
    let api = backend(&config, cli.fixture.as_deref())?;
    let api = api.as_ref();
    let store = FileSessionStore::new(&config.session_dir);
    let offset = config.utc_offset;

    match cli.command {
        Commands::Checkin(args) => booth::checkin(api, &store, args).await,
        Commands::Actions => booth::actions(api, &store).await,
        Commands::Report(args) => booth::report(api, &store, args).await,
        Commands::Switch(args) => booth::switch(api, &store, args).await,
        Commands::Exit => booth::exit(&store),
        Commands::Dashboard(args) => dashboard::show(api, args, &offset).await,
        Commands::ExportStaff(args) => {
            dashboard::export_staff(api, args, config.export_dir, &offset).await
        }
        Commands::ExportCompany(args) => {
            dashboard::export_company(api, args, config.export_dir, &offset).await
        }
    }
}

/// The HTTP backend, or an in-memory one seeded from `fixture`.
fn backend(config: &CliConfig, fixture: Option<&Path>) -> anyhow::Result<Box<dyn StaffingApi>> {
    let Some(path) = fixture else {
        tracing::debug!(api_url = %config.client.api_url, "Using HTTP backend");
        return Ok(Box::new(HttpStaffingApi::new(&config.client)?));
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read fixture {}", path.display()))?;
    let fixture: MemoryFixture = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid fixture {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Using fixture backend");
    Ok(Box::new(InMemoryStaffingApi::from_fixture(fixture)))
}
