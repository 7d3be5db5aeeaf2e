//! Staff commands: check in, list actions, report, switch booth, exit.

use boothlog_client::StaffingApi;
use boothlog_core::models::{AnswerShape, ReportButtonConfig, ReportKind};
use boothlog_flows::session::{check_in, require_checkin};
use boothlog_flows::submission::SUBMIT_SUCCEEDED;
use boothlog_flows::{BoothPage, SessionStore};
use clap::Args;

#[derive(Args, Debug)]
pub struct CheckinArgs {
    /// Booth code printed at the booth
    pub booth_code: String,

    /// Your personal staff code
    pub personal_code: String,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Action id or label, as listed by `boothlog actions`
    pub action: String,

    /// Primary answer: free text, an option label, or Sim/Não
    #[arg(short, long)]
    pub answer: String,

    /// Answer to the follow-up question, when the primary answer opens one
    #[arg(short, long)]
    pub follow_up: Option<String>,
}

#[derive(Args, Debug)]
pub struct SwitchArgs {
    /// Code of the booth to move to
    pub booth_code: String,
}

pub async fn checkin(
    api: &dyn StaffingApi,
    store: &dyn SessionStore,
    args: CheckinArgs,
) -> anyhow::Result<()> {
    let info = check_in(api, store, &args.booth_code, &args.personal_code).await?;
    println!(
        "Check-in feito: {} no estande {} ({}).",
        info.staff_name, info.booth_code, info.company_name
    );
    Ok(())
}

pub async fn actions(api: &dyn StaffingApi, store: &dyn SessionStore) -> anyhow::Result<()> {
    let page = open_current(api, store).await?;
    println!("{} | {}", page.heading(), page.session().staff_name);

    let buttons = page.visible_buttons();
    if buttons.is_empty() {
        println!("Nenhuma ação disponível para este estande.");
    }
    for button in buttons {
        print_button(button);
    }
    Ok(())
}

pub async fn report(
    api: &dyn StaffingApi,
    store: &dyn SessionStore,
    args: ReportArgs,
) -> anyhow::Result<()> {
    let mut page = open_current(api, store).await?;
    page.open_report(&args.action)?;

    let modal = page.modal_mut();
    modal.set_primary(args.answer)?;
    if let Some(follow_up) = args.follow_up {
        modal.set_follow_up(follow_up)?;
    }

    page.submit_report(api).await?;
    println!("{SUBMIT_SUCCEEDED}");
    Ok(())
}

pub async fn switch(
    api: &dyn StaffingApi,
    store: &dyn SessionStore,
    args: SwitchArgs,
) -> anyhow::Result<()> {
    let page = open_current(api, store).await?;
    let moved = page.switch_booth(api, store, &args.booth_code).await?;

    let next = BoothPage::open(api, store, &moved.booth_code).await?;
    println!("Agora no estande {} ({}).", next.booth_code(), next.heading());
    Ok(())
}

pub fn exit(store: &dyn SessionStore) -> anyhow::Result<()> {
    boothlog_flows::session::exit(store)?;
    println!("Sessão encerrada.");
    Ok(())
}

/// The page of the booth the session is checked in at.
async fn open_current(api: &dyn StaffingApi, store: &dyn SessionStore) -> anyhow::Result<BoothPage> {
    let session = require_checkin(store)?;
    Ok(BoothPage::open(api, store, &session.booth_code).await?)
}

fn print_button(button: &ReportButtonConfig) {
    println!();
    println!("[{}] {}", button.id, button.label);
    println!("    {}", button.question);
    match &button.kind {
        ReportKind::OpenText => println!("    Resposta: texto livre"),
        ReportKind::MultipleChoice { options } => {
            let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
            println!("    Opções: {}", labels.join(" | "));
        }
        ReportKind::YesNo { follow_up } => {
            println!("    Opções: Sim | Não");
            if let Some(f) = follow_up {
                println!("    Se \"{}\": {} ({})", f.trigger_value, f.question, shape_hint(&f.shape));
            }
        }
    }
}

fn shape_hint(shape: &AnswerShape) -> String {
    match shape {
        AnswerShape::FreeText => "texto livre".to_string(),
        AnswerShape::SingleChoice(options) => options
            .iter()
            .map(|o| o.label.as_str())
            .collect::<Vec<_>>()
            .join(" | "),
    }
}
