use clap::Parser;
use investor_core::config::Settings;
use investor_core::ingest::fixture::FixtureDataProvider;
use investor_core::ingest::provider::HttpJsonDataProvider;
use investor_core::pipeline::{HolisticPlan, Pipeline, PipelineOptions};
use investor_core::storage;
use investor_core::time::in_market::resolve_as_of_date;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod universe;

#[derive(Debug, Parser)]
#[command(name = "investor_worker")]
struct Args {
    /// Investable capital in rupees. Defaults to STARTING_CAPITAL.
    #[arg(long)]
    capital: Option<f64>,

    /// User profile JSON. Defaults to <data dir>/user_profile.json.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Existing holdings CSV. Defaults to <data dir>/holdings.csv.
    #[arg(long)]
    holdings: Option<PathBuf>,

    /// Ticker universe CSV with a `Symbol` column. Defaults to <data dir>/nifty500.csv.
    #[arg(long)]
    universe: Option<PathBuf>,

    /// Serve market data and news from a JSON fixture instead of the HTTP provider.
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Candidates to size positions for before screening.
    #[arg(long)]
    top_n: Option<usize>,

    /// Deduct estimated insurance premiums from the capital before investing.
    #[arg(long)]
    deduct_insurance: bool,

    /// Report as-of date (YYYY-MM-DD). Defaults to the latest closed NSE session.
    #[arg(long)]
    as_of_date: Option<String>,

    /// Do everything except writing the report.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = run(args, settings).await {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "advisory run failed");
        return Err(err);
    }
    Ok(())
}

async fn run(args: Args, settings: Settings) -> anyhow::Result<()> {
    let as_of_date = resolve_as_of_date(args.as_of_date.as_deref(), chrono::Utc::now())?;

    let capital = args.capital.unwrap_or(settings.starting_capital);
    anyhow::ensure!(
        capital.is_finite() && capital >= 0.0,
        "capital must be a non-negative amount (got {capital})"
    );

    let profile_path = args.profile.clone().unwrap_or_else(|| settings.profile_path());
    let holdings_path = args.holdings.clone().unwrap_or_else(|| settings.holdings_path());
    let universe_path = args.universe.clone().unwrap_or_else(|| settings.universe_path());

    let profile = storage::profile::load_or_create(&profile_path)?;
    let holdings = storage::holdings::load(&holdings_path)?;

    let mut options = PipelineOptions::from_env();
    if let Some(n) = args.top_n.filter(|n| *n > 0) {
        options.top_n = n;
    }
    options.deduct_insurance = args.deduct_insurance;

    let universe_opts = universe::UniverseOptions::from_env();

    tracing::info!(
        %as_of_date,
        capital,
        holdings = holdings.len(),
        top_n = options.top_n,
        dry_run = args.dry_run,
        "starting advisory run"
    );

    let plan = match &args.fixture {
        Some(path) => {
            let provider = FixtureDataProvider::load(path)?;
            let tickers = if universe_path.exists() {
                universe::load_universe(&universe_path, &universe_opts)
            } else {
                provider.tickers()
            };
            Pipeline::new(&provider, &provider, options)
                .run(&profile, &holdings, &tickers, capital)
                .await
        }
        None => {
            let provider = HttpJsonDataProvider::from_settings(&settings)?;
            let tickers = universe::load_universe(&universe_path, &universe_opts);
            Pipeline::new(&provider, &provider, options)
                .run(&profile, &holdings, &tickers, capital)
                .await
        }
    };

    log_plan(&plan);

    if args.dry_run {
        tracing::info!(%as_of_date, rows = plan.report_rows().len(), "dry-run: report not written");
        return Ok(());
    }

    match storage::report::write_report(&settings.reports_dir, as_of_date, &plan.report_rows())? {
        Some(path) => tracing::info!(path = %path.display(), "holistic plan saved"),
        None => tracing::warn!("no investments recommended (all filters failed)"),
    }
    Ok(())
}

fn log_plan(plan: &HolisticPlan) {
    tracing::info!(
        status = ?plan.health.status,
        monthly_surplus = plan.health.monthly_surplus,
        "financial health"
    );
    for rec in plan.recommendations() {
        tracing::info!(
            category = rec.category(),
            subject = %rec.subject(),
            amount = rec.amount(),
            rationale = %rec.rationale(),
            "recommendation"
        );
    }
    for sell in &plan.sells {
        tracing::warn!(
            ticker = %sell.ticker,
            shares = sell.shares,
            est_value = sell.est_value,
            pnl_pct = sell.pnl_pct,
            reason = %sell.reason,
            "sell"
        );
    }
    tracing::info!(
        capital = plan.capital,
        premium_deducted = plan.premium_deducted,
        stock_budget = plan.stock_budget,
        stock_spend = plan.stock_spend(),
        "plan summary"
    );
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
