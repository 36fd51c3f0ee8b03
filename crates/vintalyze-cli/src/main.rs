use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "vintalyze")]
#[command(about = "Seller metrics from a pasted Vinted profile page")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse one profile dump and print its enriched record
    Analyze {
        /// Text file holding the pasted page, or `-` for stdin
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = AnalyzeFormat::Json)]
        format: AnalyzeFormat,
        /// Reference time for relative review dates (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Parse two profile dumps and print them side by side
    Compare {
        first: PathBuf,
        second: PathBuf,
        #[arg(long, value_enum, default_value_t = CompareFormat::Text)]
        format: CompareFormat,
        /// Reference time for relative review dates (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AnalyzeFormat {
    /// Enriched record as pretty JSON
    Json,
    /// Export document as plain text tables
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CompareFormat {
    Json,
    Text,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = vintalyze_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let analyzer = commands::build_analyzer(&config)?;

    let output = match cli.command {
        Commands::Analyze { input, format, now } => {
            let now = now.unwrap_or_else(Utc::now);
            let record = commands::analyze_file(&analyzer, &input, now)?;
            commands::render_analysis(&record, format)?
        }
        Commands::Compare {
            first,
            second,
            format,
            now,
        } => {
            let now = now.unwrap_or_else(Utc::now);
            let first = commands::analyze_file(&analyzer, &first, now)?;
            let second = commands::analyze_file(&analyzer, &second, now)?;
            commands::render_comparison(&first, &second, format)?
        }
    };

    println!("{output}");
    Ok(())
}
