//! Read-only tabular listing over the store.
//!
//! No caching: every call re-reads the store.

use anyhow::Result;

use crate::config::Config;
use crate::db;
use crate::store;

/// CLI entry point for `bdx list`.
pub async fn run_list(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    store::initialize(&pool).await?;

    let summaries = store::list_summaries(&pool).await?;
    pool.close().await;

    if summaries.is_empty() {
        println!("No organizations stored. Run `bdx ingest <batch>` first.");
        return Ok(());
    }

    println!("{:<32} {:<40} LOCATION", "NAME", "WEBSITE");
    for summary in &summaries {
        println!(
            "{:<32} {:<40} {}",
            summary.name, summary.website_url, summary.location
        );
    }
    println!();
    println!("{} organizations.", summaries.len());

    Ok(())
}
