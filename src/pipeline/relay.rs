use crate::app::fetch_use_case::FetchUseCase;
use crate::app::ports::HttpClientPort;
use crate::app::push_use_case::PushUseCase;
use crate::config::RelayConfig;
use crate::error::Result;
use crate::pipeline::chunk::{chunk_and_plan, Chunked};
use crate::types::RelaySummary;
use std::sync::Arc;
use tracing::info;

/// Run Fetch → Chunk → Push once.
///
/// With `dry_run` the batches are planned and printed but nothing is POSTed.
pub async fn run_relay(
    config: &RelayConfig,
    http: Arc<dyn HttpClientPort>,
    dry_run: bool,
) -> Result<RelaySummary> {
    // Build the pusher first so a missing webhook fails before any network call
    let pusher = if dry_run {
        None
    } else {
        Some(PushUseCase::new(http.clone(), config)?)
    };
    let fetcher = FetchUseCase::new(http, config);

    let records = fetcher.fetch_records().await?;
    let records_fetched = records.len();
    println!("Fetched {} total items", records_fetched);

    let Chunked { batches, planned } = chunk_and_plan(records, config.max_batch_bytes)?;
    info!(
        batches = planned.len(),
        max_batch_bytes = config.max_batch_bytes,
        "Chunked records into batches"
    );

    let pushed = match pusher {
        Some(pusher) => pusher.push_batches(&batches).await?,
        None => {
            for batch in &planned {
                println!(
                    "• batch {} ({} items, {} bytes) [dry run]",
                    batch.batch_number, batch.item_count, batch.list_bytes
                );
            }
            Vec::new()
        }
    };

    Ok(RelaySummary {
        records_fetched,
        planned,
        pushed,
        dry_run,
    })
}
