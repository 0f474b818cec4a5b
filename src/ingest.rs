//! Ingestion pipeline orchestration.
//!
//! One ingestion run is strictly linear: fetch the batch once, persist it
//! in one transaction, report counts. A fetch failure aborts the run before
//! anything touches the store; an empty batch is a warning, not an error.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;
use crate::error::Error;
use crate::fetch::{CatalogClient, FetchBatch};
use crate::store;

/// Counts reported after an ingestion run.
#[derive(Debug, Clone, Copy)]
pub struct IngestReport {
    pub fetched: u64,
    pub inserted: u64,
    pub skipped: u64,
}

/// CLI entry point for `bdx ingest <batch>`.
pub async fn run_ingest(config: &Config, batch: &str) -> Result<()> {
    let fetcher = CatalogClient::new(&config.catalog)?;
    let pool = db::connect(config).await?;
    store::initialize(&pool).await?;

    let report = ingest(&fetcher, &pool, batch).await?;

    println!("ingest \"{}\"", batch);
    println!("  fetched:  {} records", report.fetched);
    println!("  inserted: {}", report.inserted);
    println!("  skipped:  {} (already stored)", report.skipped);
    println!("ok");

    pool.close().await;
    Ok(())
}

/// Core pipeline, generic over the fetch seam so tests can stub it.
pub async fn ingest(
    fetcher: &dyn FetchBatch,
    pool: &SqlitePool,
    batch: &str,
) -> Result<IngestReport, Error> {
    if batch.is_empty() {
        return Err(Error::Input(
            "batch identifier must not be empty".to_string(),
        ));
    }

    let records = fetcher.fetch_batch(batch).await?;

    if records.is_empty() {
        eprintln!(
            "warning: no records found for batch \"{}\" — the batch may be unreleased or misspelled",
            batch
        );
    }

    let outcome = store::store_batch(pool, &records).await?;

    Ok(IngestReport {
        fetched: records.len() as u64,
        inserted: outcome.inserted,
        skipped: outcome.skipped,
    })
}
