//! # batchdex
//!
//! A local-first catalog of organization records, ingested per batch from a
//! remote directory service.
//!
//! The pipeline is strictly linear per invocation: fetch a named batch from
//! the catalog API, persist the records into a single SQLite table with
//! insert-ignore-by-slug semantics, then read them back for display or
//! selection. Re-running an ingestion is safe — a record whose slug already
//! exists is silently skipped, never merged or updated.
//!
//! ```text
//! ┌───────────┐   ┌──────────┐   ┌─────────┐   ┌──────────────┐
//! │  Catalog  │──▶│  Ingest  │──▶│ SQLite  │──▶│ List / Show  │
//! │   (HTTP)  │   │ pipeline │   │  store  │   │  + enrich    │
//! └───────────┘   └──────────┘   └─────────┘   └──────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration (catalog credentials, db path) |
//! | [`models`] | The organization record and tag encoding |
//! | [`error`] | Pipeline error taxonomy |
//! | [`fetch`] | Remote catalog fetcher (`FetchBatch` trait) |
//! | [`store`] | SQLite record store and the duplicate policy |
//! | [`ingest`] | Fetch-then-persist orchestration |
//! | [`listing`] | Tabular read-back |
//! | [`select`] | Selection prompt and detail view |
//! | [`enrich`] | Best-effort website contact scrape |
//! | [`db`] | Database connection |

pub mod config;
pub mod db;
pub mod enrich;
pub mod error;
pub mod fetch;
pub mod ingest;
pub mod listing;
pub mod models;
pub mod select;
pub mod store;
