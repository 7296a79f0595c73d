mod analyze;
mod report;
mod schedule;
mod status;
mod workspace;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::workspace::Workspace;

#[derive(Debug, Parser)]
#[command(name = "chatpulse")]
#[command(about = "Regional chat analytics: sentiment, themes, needs and LLM reports")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the analysis pipeline for one region or every active region
    Analyze {
        /// Region code (e.g. POL). Omit to analyze all active regions.
        #[arg(long)]
        region: Option<String>,
    },
    /// Print the natural-language report for a region
    Report {
        #[arg(long)]
        region: String,
        /// Ignore the cache and request a new report
        #[arg(long, default_value_t = false)]
        fresh: bool,
    },
    /// List configured regions and their analysis state
    Status,
    /// Run the scheduled refresh until interrupted
    Schedule,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("chatpulse: no command given, see --help");
        return Ok(());
    };

    let config = chatpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %config.env, data_dir = %config.data_dir.display(), "config loaded");

    let workspace = Arc::new(Workspace::load(config)?);

    match command {
        Commands::Analyze { region } => analyze::run_analyze(&workspace, region.as_deref()).await,
        Commands::Report { region, fresh } => report::run_report(&workspace, &region, fresh).await,
        Commands::Status => {
            status::run_status(&workspace);
            Ok(())
        }
        Commands::Schedule => schedule::run_schedule(workspace).await,
    }
}
