//! # batchdex CLI (`bdx`)
//!
//! ## Usage
//!
//! ```bash
//! bdx --config ./config/bdx.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `bdx init` | Create the SQLite database and the organizations table |
//! | `bdx ingest <batch>` | Fetch a batch from the catalog and persist it |
//! | `bdx list` | Print the stored organizations as a table |
//! | `bdx show [--pick n]` | Select one record, print details, scrape contact info |
//!
//! `<batch>` accepts either a raw batch name (`"Summer 2023"`) or a catalog
//! URL carrying a `batch` query parameter.

mod config;
mod db;
mod enrich;
mod error;
mod fetch;
mod ingest;
mod listing;
mod models;
mod select;
mod store;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// batchdex — a local catalog of organization records ingested per batch.
#[derive(Parser)]
#[command(
    name = "bdx",
    about = "batchdex — fetch organization batches from a remote catalog into a local SQLite store",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/bdx.toml`. Catalog credentials and the
    /// database path are read from this file.
    #[arg(long, global = true, default_value = "./config/bdx.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite file and the organizations table. Idempotent —
    /// running it multiple times is safe and never destroys data.
    Init,

    /// Fetch a batch from the catalog and persist it.
    ///
    /// One network request, one transaction. Records whose slug is already
    /// stored are skipped; re-ingesting the same batch is a no-op.
    Ingest {
        /// Batch name (e.g. "Summer 2023") or a catalog URL with a
        /// `batch` query parameter.
        batch: String,
    },

    /// Print the stored organizations as a table, ordered by name.
    List,

    /// Select one organization and print its details.
    ///
    /// Prompts on stdin unless `--pick` is given. Also attempts a
    /// best-effort contact scrape of the organization's website; scrape
    /// failures are warnings, not errors.
    Show {
        /// Select by index (as shown by the prompt) instead of prompting.
        #[arg(long)]
        pick: Option<usize>,
    },
}

/// Accept either a raw batch name or a catalog companies-page URL such as
/// `https://catalog.example/companies?batch=Winter%202022`, from which the
/// `batch` query parameter is extracted.
fn resolve_batch_arg(arg: &str) -> Result<String> {
    if arg.starts_with("http://") || arg.starts_with("https://") {
        let parsed = url::Url::parse(arg).with_context(|| format!("failed to parse URL: {}", arg))?;
        let batch = parsed
            .query_pairs()
            .find(|(key, _)| key == "batch")
            .map(|(_, value)| value.into_owned());
        return match batch {
            Some(b) if !b.is_empty() => Ok(b),
            _ => bail!("no batch parameter found in URL: {}", arg),
        };
    }
    Ok(arg.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let pool = db::connect(&cfg).await?;
            store::initialize(&pool).await?;
            pool.close().await;
            println!("Database initialized successfully.");
        }
        Commands::Ingest { batch } => {
            let batch = resolve_batch_arg(&batch)?;
            ingest::run_ingest(&cfg, &batch).await?;
        }
        Commands::List => {
            listing::run_list(&cfg).await?;
        }
        Commands::Show { pick } => {
            select::run_show(&cfg, pick).await?;
        }
    }

    Ok(())
}
