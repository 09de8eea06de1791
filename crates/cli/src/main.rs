use anyhow::Context;
use clap::Parser;
use scanlens_core::domain::scan::ScanRecord;
use scanlens_core::outcome::OutcomeState;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "scanlens")]
struct Args {
    /// Scan result to evaluate: a JSON array of recommendation records.
    #[arg(long)]
    input: std::path::PathBuf,

    /// Scan date (YYYY-MM-DD). Defaults to the last completed KRX session.
    #[arg(long)]
    scan_date: Option<String>,

    /// Pretty-print the evaluation report.
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = scanlens_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = run(&args, &settings) {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "scan evaluation failed");
        return Err(err);
    }

    Ok(())
}

fn run(args: &Args, settings: &scanlens_core::config::Settings) -> anyhow::Result<()> {
    let scan_date =
        scanlens_core::time::kr_market::resolve_scan_date(args.scan_date.as_deref(), chrono::Utc::now())?;

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("read {} failed", args.input.display()))?;
    let records: Vec<ScanRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("parse {} failed", args.input.display()))?;

    let evaluated = scanlens_core::evaluate::evaluate_scan(
        &records,
        scan_date,
        settings.urgency_window_days(),
    );

    let stop_loss_hits = evaluated
        .iter()
        .filter(|e| e.classification.state == OutcomeState::StopLossReached)
        .count();
    let no_data = evaluated
        .iter()
        .filter(|e| e.classification.state == OutcomeState::NoData)
        .count();
    tracing::info!(
        %scan_date,
        records = evaluated.len(),
        stop_loss_hits,
        no_data,
        "scan evaluated"
    );

    let out = if args.pretty {
        serde_json::to_string_pretty(&evaluated)?
    } else {
        serde_json::to_string(&evaluated)?
    };
    println!("{out}");

    Ok(())
}

fn init_sentry(settings: &scanlens_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
