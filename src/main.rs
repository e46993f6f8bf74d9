use batch_relay::config::{ConfigOverrides, FileConfig, RelayConfig};
use batch_relay::constants::{PUSHGATEWAY_URL_ENV, TOKEN_ENV};
use batch_relay::infra::ReqwestHttp;
use batch_relay::metrics_push::{instance_name, push_metrics};
use batch_relay::pipeline::run_relay;
use batch_relay::{logging, metrics};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "batch_relay")]
#[command(about = "Fetch a JSON collection and republish it to a webhook in size-bounded batches")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Optional TOML config file with [source] and [webhook] sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fetch and plan the batches without pushing anything
    #[arg(long)]
    dry_run: bool,
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let file = cli.config.as_deref().map(FileConfig::load).transpose()?;
    let token = std::env::var(TOKEN_ENV).ok();
    let config = RelayConfig::resolve(cli.overrides, file, token, !cli.dry_run)?;
    info!(?config, dry_run = cli.dry_run, "Starting relay");

    let http = Arc::new(ReqwestHttp::new()?);
    let summary = run_relay(&config, http, cli.dry_run).await?;

    if summary.dry_run {
        println!(
            "Dry run: {} items would go out in {} batches",
            summary.records_fetched,
            summary.planned.len()
        );
    } else {
        println!(
            "Done: pushed {} items in {} batches",
            summary.items_pushed(),
            summary.pushed.len()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads env-backed flags
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();
    let cli = Cli::parse();
    metrics::init_metrics();

    let result = run(cli).await;
    if let Err(e) = &result {
        error!("Relay failed: {:#}", e);
    }

    if let Ok(gateway) = std::env::var(PUSHGATEWAY_URL_ENV) {
        if let Err(e) = push_metrics(&gateway, &instance_name()).await {
            warn!("Failed to push metrics: {}", e);
        }
    }

    result
}
