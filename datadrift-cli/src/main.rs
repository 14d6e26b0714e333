use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use datadrift_charts::ChartClient;
use datadrift_core::{logging, CoreConfig};
use datadrift_reports::DocStoreClient;

mod pipeline;

#[derive(Parser)]
#[command(name = "datadrift")]
#[command(about = "KPI drift detection and reporting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: detect changes, render the chart, publish the report
    Sync,
    /// Detect changes and print the timeline as JSON, without any network calls
    Inspect(InspectArgs),
}

#[derive(Args)]
struct InspectArgs {
    /// Path of the persisted snapshot store
    #[arg(long, env = "DATADRIFT_HISTORY_PATH")]
    history: PathBuf,
    /// Metric key to inspect
    #[arg(long, env = "DATADRIFT_METRIC_KEY")]
    metric: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing(None)?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync => {
            let config = CoreConfig::from_env().context("loading configuration")?;
            let renderer = ChartClient::new(&config.chart_service_url)?;
            let publisher = DocStoreClient::new(
                &config.docs_base_url,
                &config.docs_token,
                &config.docs_collection_id,
            )?;

            let report = pipeline::run_sync(&config, &renderer, &publisher).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Inspect(args) => {
            let timeline = pipeline::run_inspect(&args.history, &args.metric)?;
            println!("{}", serde_json::to_string_pretty(&timeline)?);
        }
    }

    Ok(())
}
