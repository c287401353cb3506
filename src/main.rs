use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod breakdown;
mod comments;
mod compare;
mod config;
mod dashboard;
mod error;
mod fields;
mod geo;
mod models;
mod period;
mod ratings;
mod report;
mod source;

use config::BackendConfig;
use dashboard::Dashboard;
use models::{DateRange, PeriodPair, Review};
use source::AirtableSource;

#[derive(Parser)]
#[command(name = "review-pulse")]
#[command(about = "Period-over-period guest review dashboard for the lodge", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct RangeArgs {
    /// First day of the current period (defaults to the start of this month)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last day of the current period (defaults to the end of this month)
    #[arg(long)]
    to: Option<NaiveDate>,
    /// First day of the comparison period (defaults to one month earlier)
    #[arg(long, requires = "compare_to")]
    compare_from: Option<NaiveDate>,
    /// Last day of the comparison period
    #[arg(long, requires = "compare_from")]
    compare_to: Option<NaiveDate>,
}

impl RangeArgs {
    fn resolve(&self) -> anyhow::Result<(DateRange, DateRange)> {
        let compare = self.compare_from.zip(self.compare_to);
        let (current, previous) = period::resolve_ranges(self.from, self.to, compare);
        anyhow::ensure!(
            current.from <= current.to,
            "current period starts after it ends ({current})"
        );
        anyhow::ensure!(
            previous.from <= previous.to,
            "comparison period starts after it ends ({previous})"
        );
        Ok((current, previous))
    }
}

#[derive(Args, Debug, Clone)]
struct InputArgs {
    /// Review export (.json or .csv) to read instead of the backend
    #[arg(long)]
    input: Option<PathBuf>,
    /// Check-in export (.json or .csv) for guest counts
    #[arg(long)]
    check_ins: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the headline stat cards
    Summary {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        range: RangeArgs,
        /// Print the full dashboard as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    Report {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// List recent reviews in the current period
    Reviews {
        /// Review export (.json or .csv) to read instead of the backend
        #[arg(long)]
        input: Option<PathBuf>,
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Download reviews for both periods into a local JSON export
    Fetch {
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long, default_value = "snapshot.json")]
        out: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_export(path: &Path) -> anyhow::Result<Vec<Review>> {
    source::load_file(path).with_context(|| format!("failed to load {}", path.display()))
}

async fn load_reviews(
    input: Option<&Path>,
    current: &DateRange,
    previous: &DateRange,
) -> anyhow::Result<PeriodPair> {
    let records = match input {
        Some(path) => read_export(path)?,
        None => {
            let backend = AirtableSource::new(BackendConfig::from_env()?);
            backend
                .fetch_reviews(&[*current, *previous])
                .await
                .context("failed to fetch reviews")?
        }
    };
    Ok(period::bucket(records, current, previous))
}

async fn load_check_ins(
    input: &InputArgs,
    current: &DateRange,
    previous: &DateRange,
) -> anyhow::Result<Option<PeriodPair>> {
    let records = match (&input.check_ins, &input.input) {
        (Some(path), _) => Some(read_export(path)?),
        (None, Some(_)) => None,
        (None, None) => {
            let backend = AirtableSource::new(BackendConfig::from_env()?);
            if backend.config().indemnity_table.is_none() {
                warn!("AIRTABLE_INDEMNITY_TABLE_NAME not set; skipping guest check-in stats");
            }
            backend
                .fetch_check_ins(&[*current, *previous])
                .await
                .context("failed to fetch check-ins")?
        }
    };
    Ok(records.map(|records| period::bucket(records, current, previous)))
}

async fn build_dashboard(
    input: &InputArgs,
    current: &DateRange,
    previous: &DateRange,
) -> anyhow::Result<Dashboard> {
    let reviews = load_reviews(input.input.as_deref(), current, previous).await?;
    let check_ins = load_check_ins(input, current, previous).await?;
    info!(
        current = reviews.current_period.len(),
        previous = reviews.previous_period.len(),
        "aggregating reviews"
    );
    Ok(Dashboard::build(&reviews, check_ins.as_ref()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Summary { input, range, json } => {
            let (current, previous) = range.resolve()?;
            let dashboard = build_dashboard(&input, &current, &previous).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                println!("Period {current} vs {previous}:");
                print!("{}", report::render_summary(&dashboard));
            }
        }
        Commands::Report { input, range, out } => {
            let (current, previous) = range.resolve()?;
            let dashboard = build_dashboard(&input, &current, &previous).await?;
            let report = report::render(&dashboard, &current, &previous);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Reviews { input, range, page } => {
            let (current, previous) = range.resolve()?;
            let reviews = load_reviews(input.as_deref(), &current, &previous).await?;
            let listing =
                comments::recent_reviews(&reviews.current_period, page, comments::REVIEWS_PER_PAGE);

            if listing.data.is_empty() {
                println!("No reviews submitted in {current}.");
                return Ok(());
            }

            println!(
                "Reviews {current} (page {} of {}):",
                listing.current_page, listing.total_pages
            );
            for review in &listing.data {
                println!(
                    "- {} on {}: OTS {} WES {} recommend {}",
                    review.name,
                    review.submitted_on.as_deref().unwrap_or("unknown date"),
                    report::score_percent(review.ots),
                    report::score_percent(review.wes),
                    if review.recommend { "yes" } else { "no" }
                );
            }
        }
        Commands::Fetch { range, out } => {
            let (current, previous) = range.resolve()?;
            let backend = AirtableSource::new(BackendConfig::from_env()?);
            let records = backend
                .fetch_reviews(&[current, previous])
                .await
                .context("failed to fetch reviews")?;
            std::fs::write(&out, serde_json::to_string_pretty(&records)?)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Saved {} reviews to {}.", records.len(), out.display());
        }
    }

    Ok(())
}
