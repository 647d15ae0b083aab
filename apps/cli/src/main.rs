//! Triage CLI - operator command line for the risk triage console.
//!
//! Provides a `triage` command for browsing the filtered, sorted order view,
//! checking tab counts, classifying risk scores, previewing threshold repairs,
//! and reading or replying to an order's transcript.

mod colors;
mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use triage_core::{TriageConfig, TriageConfigLoader};

/// Triage - risk triage console for delivery orders
#[derive(Parser, Debug)]
#[command(
    name = "triage",
    author,
    version,
    about = "Triage - risk triage console for delivery orders",
    long_about = "Routes delivery orders into no-action, manual-review and agentic-handling tiers,\nand shows the per-order communication transcript."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List orders
    ///
    /// Shows the filtered, sorted order view. Defaults come from the `[view]`
    /// section of the configuration.
    Orders {
        /// Orders file (JSON array)
        #[arg(short, long)]
        file: PathBuf,

        /// Status filter (all, support_required, action_required, ai_resolving, completed)
        #[arg(long)]
        filter: Option<String>,

        /// Sort as COLUMN[:asc|desc|none] (orderNumber, customer, destination, status, value)
        #[arg(long)]
        sort: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show order counts per status tab
    Counts {
        /// Orders file (JSON array)
        #[arg(short, long)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a risk score into a handling tier
    Classify {
        /// Risk score in percent, or a failure probability with --probability
        #[arg(allow_negative_numbers = true)]
        score: f64,

        /// Treat the score as a failure probability in 0..1
        #[arg(long)]
        probability: bool,

        /// Manual review threshold (overrides configuration)
        #[arg(long)]
        manual: Option<u8>,

        /// Agentic handling threshold (overrides configuration)
        #[arg(long)]
        agent: Option<u8>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply and save a threshold pair
    ///
    /// Shows the configuration after auto-repair and the resulting score bands.
    Thresholds {
        /// Proposed manual review threshold
        #[arg(long)]
        manual: u8,

        /// Proposed agentic handling threshold
        #[arg(long)]
        agent: u8,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show an order's transcript
    Transcript {
        /// Orders file (JSON array)
        #[arg(short, long)]
        file: PathBuf,

        /// Order id or order number
        order: String,

        /// Preview the transcript for another status
        #[arg(long, conflicts_with = "say")]
        as_status: Option<String>,

        /// Send a message and wait for the reply
        #[arg(long)]
        say: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => TriageConfigLoader::load(path)?,
        None => TriageConfig::default(),
    };

    match args.command {
        Command::Orders { file, filter, sort, json } => {
            commands::orders::execute(&config, &file, filter.as_deref(), sort.as_deref(), json).await
        }
        Command::Counts { file, json } => commands::counts::execute(&file, json).await,
        Command::Classify { score, probability, manual, agent, json } => {
            commands::classify::execute(&config, score, probability, manual, agent, json)
        }
        Command::Thresholds { manual, agent, json } => {
            commands::thresholds::execute(&config, manual, agent, json)
        }
        Command::Transcript { file, order, as_status, say, json } => {
            commands::transcript::execute(
                &config,
                &file,
                &order,
                as_status.as_deref(),
                say.as_deref(),
                json,
            )
            .await
        }
    }
}
