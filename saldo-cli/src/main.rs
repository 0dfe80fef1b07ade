use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use chrono_tz::Tz;
use std::fs;
use std::path::PathBuf;

use saldo_client::{ApiLoader, MonthView, Session, SessionState};
use saldo_core::{
    DirectionFilter, Period, Transaction, filter_by_direction, group_by_day, local_day, summarize,
    time::today,
};
use saldo_ingest::{RawRecord, normalize};

mod config;
mod render;

#[derive(Parser, Debug)]
#[command(name = "saldo", version, about = "Month view over the saldo finance API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default config to ~/.saldo/config.toml
    Init,

    /// Render a month view from a local JSON export of raw records
    View {
        /// Path to a JSON array of raw records
        #[arg(long)]
        json: PathBuf,

        /// Month 1-12 (defaults to the current month; pass with --year)
        #[arg(long)]
        month: Option<u32>,

        /// Four-digit year
        #[arg(long)]
        year: Option<i32>,

        /// List filter: entrada or saida/despesa (summary stays unfiltered)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Fetch a month from the remote API and render it
    Fetch {
        /// Base URL (default: base_url from config)
        #[arg(long)]
        base_url: Option<String>,

        /// Bearer token (default: token from config)
        #[arg(long)]
        token: Option<String>,

        #[arg(long)]
        month: Option<u32>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        filter: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init => config::init_config()?,

        Command::View {
            json,
            month,
            year,
            filter,
        } => view_local(json, month, year, filter)?,

        Command::Fetch {
            base_url,
            token,
            month,
            year,
            filter,
        } => fetch_remote(base_url, token, month, year, filter).await?,
    }

    Ok(())
}

fn parse_tz(timezone: &str) -> Result<Tz> {
    timezone
        .parse()
        .map_err(|_| anyhow!("invalid timezone: {timezone}"))
}

fn resolve_period(month: Option<u32>, year: Option<i32>, tz: Tz) -> Result<Period> {
    match (month, year) {
        (Some(month), Some(year)) => {
            Period::new(month, year).ok_or_else(|| anyhow!("month must be 1-12, got {month}"))
        }
        (None, None) => Ok(Period::current(tz)),
        _ => bail!("pass both --month and --year, or neither"),
    }
}

fn view_local(
    path: PathBuf,
    month: Option<u32>,
    year: Option<i32>,
    filter: Option<String>,
) -> Result<()> {
    let cfg = config::load_config()?;
    let tz = parse_tz(&cfg.timezone)?;
    let period = resolve_period(month, year, tz)?;

    if !path.exists() {
        bail!("JSON export not found: {}", path.display());
    }
    let text = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let records: Vec<RawRecord> =
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;

    let report = normalize(&records);
    // The export may span months; scope to the requested period the same
    // way a fetch would be scoped server-side.
    let in_period: Vec<Transaction> = report
        .transactions
        .into_iter()
        .filter(|t| period.contains(local_day(t.timestamp, tz)))
        .collect();

    let filter = filter
        .map(|label| DirectionFilter::from_label(&label))
        .unwrap_or_default();
    let filtered = filter_by_direction(&in_period, filter);

    let view = MonthView {
        period,
        summary: summarize(&in_period),
        groups: group_by_day(&filtered, tz),
        dropped: report.dropped,
    };
    render::print_month_view(&view, today(tz), tz);
    Ok(())
}

async fn fetch_remote(
    base_url: Option<String>,
    token: Option<String>,
    month: Option<u32>,
    year: Option<i32>,
    filter: Option<String>,
) -> Result<()> {
    let cfg = config::load_config()?;
    let tz = parse_tz(&cfg.timezone)?;
    let period = resolve_period(month, year, tz)?;

    let base_url = base_url
        .or(cfg.base_url)
        .context("no base URL: pass --base-url or set it in ~/.saldo/config.toml")?;
    let mut loader = ApiLoader::new(base_url);
    if let Some(token) = token.or(cfg.token) {
        loader = loader.with_token(token);
    }

    let mut session = Session::new(loader, tz, period);
    session.refresh().await;
    if let Some(label) = filter {
        session.set_filter(DirectionFilter::from_label(&label));
    }

    match session.state() {
        SessionState::Ready(view) => render::print_month_view(view, today(tz), tz),
        SessionState::Error { message } => bail!("fetch failed: {message}"),
        state => bail!("unexpected session state: {state:?}"),
    }
    Ok(())
}
