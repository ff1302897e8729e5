use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use robodash::api::ApiClient;
use robodash::config::{load_config, DashboardConfig};
use robodash::probe::AvailabilityProbe;

#[derive(Parser)]
#[command(name = "dash-cli")]
#[command(about = "One-shot queries against the dashboard endpoints", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file (built-in defaults when omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the current dashboard statistics
    Stats,
    /// List image filenames in a folder
    Images { folder: String },
    /// Search the dataset, waiting out a launching viewer
    Search { query: String },
    /// Probe an origin for reachability
    Probe { url: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DashboardConfig::default(),
    };
    let client = ApiClient::new(config.endpoints.clone());

    match cli.command {
        Commands::Stats => {
            let stats = client.fetch_stats().await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Images { folder } => {
            for name in client.list_images(&folder).await? {
                println!("{}", name);
            }
        }
        Commands::Search { query } => {
            let results = client
                .search_with_launch_retry(
                    &query,
                    Duration::from_millis(config.search.launch_retry_delay_ms),
                    config.search.max_launch_retries,
                )
                .await?;
            for item in results {
                println!("{}", item);
            }
        }
        Commands::Probe { url } => {
            let probe = AvailabilityProbe::new();
            let result = probe
                .check_with_retry(
                    &url,
                    Duration::from_millis(config.probe.timeout_ms),
                    config.probe.max_attempts,
                    Duration::from_millis(config.probe.backoff_base_ms),
                )
                .await;
            if result.reachable {
                println!("reachable");
            } else {
                println!("unreachable: {:?}", result.error_kind);
            }
        }
    }

    Ok(())
}
