use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use clinic_sales_gen::{
    seeded_rng, write_csv, Catalog, MonthlySummary, ScenarioConfig, ScenarioGenerator,
    TransactionRow, UniformConfig, UniformGenerator, DEFAULT_ROWS,
};

/// Synthetic clinic sales tables for analytics and dashboard demos
#[derive(Parser)]
#[command(name = "clinic-sales-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// N independent rows with random dates, sorted by date
    Uniform {
        /// Number of rows
        #[arg(short, long, default_value_t = DEFAULT_ROWS)]
        rows: usize,

        /// First transaction day (YYYY-MM-DD)
        #[arg(long, default_value = "2023-01-01")]
        start: NaiveDate,

        /// Last transaction day (YYYY-MM-DD)
        #[arg(long, default_value = "2023-12-31")]
        end: NaiveDate,

        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output CSV path
        #[arg(short, long, default_value = "dummy_erha_sales.csv")]
        output: PathBuf,

        /// Also write the monthly summary as JSON
        #[arg(long)]
        summary_json: Option<PathBuf>,
    },

    /// One calendar year with a Q4 slump, a laser supply disruption and a staffing gap
    Scenario {
        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output CSV path
        #[arg(short, long, default_value = "erha_sales_case_study.csv")]
        output: PathBuf,

        /// Also write the monthly summary as JSON
        #[arg(long)]
        summary_json: Option<PathBuf>,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let catalog = Catalog::standard();

    match cli.command {
        Commands::Uniform {
            rows,
            start,
            end,
            seed,
            output,
            summary_json,
        } => {
            let config = UniformConfig::default().with_rows(rows).with_range(start, end);
            let generator = UniformGenerator::new(&catalog, config)?;

            let (mut rng, seed) = seeded_rng(seed);
            info!("Seed: {}", seed);

            let rows = generator.generate(&mut rng)?;
            finish(&rows, &output, summary_json.as_deref())?;
        }
        Commands::Scenario {
            seed,
            output,
            summary_json,
        } => {
            let generator = ScenarioGenerator::new(&catalog, ScenarioConfig::default())?;

            let (mut rng, seed) = seeded_rng(seed);
            info!("Seed: {}", seed);

            let rows = generator.generate(&mut rng)?;
            finish(&rows, &output, summary_json.as_deref())?;
        }
    }

    Ok(())
}

/// Write the table, then log the monthly summary
fn finish(rows: &[TransactionRow], output: &Path, summary_json: Option<&Path>) -> Result<()> {
    let report = write_csv(output, rows)?;
    info!("Total data: {} rows", report.rows);
    info!("SHA-256: {}", report.sha256);

    let summary = MonthlySummary::from_rows(rows);
    info!("Monthly sales:");
    for line in summary.lines() {
        info!("  {}", line);
    }
    info!("{}", summary.summary());

    if let Some(path) = summary_json {
        summary.save_json(path)?;
        info!("Summary written to {}", path.display());
    }

    if rows.is_empty() {
        warn!("No rows generated; {} holds only the header", output.display());
    }

    Ok(())
}
