//! Pipeline error taxonomy.
//!
//! Every stage of the ingestion pipeline fails with one of these variants so
//! callers (and tests) can tell a bad argument from a bad response from a
//! bad disk. Enrichment is deliberately absent: contact scraping uses plain
//! `anyhow` and is downgraded to a warning at the call site.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required argument is missing or empty. Raised before any network
    /// or store work happens.
    #[error("invalid input: {0}")]
    Input(String),

    /// The catalog service answered with a non-success status. The body is
    /// not parsed in this case.
    #[error("catalog request to {url} failed with status {status}")]
    Remote { status: StatusCode, url: String },

    /// The request never completed (DNS, connect, timeout).
    #[error("catalog request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body did not decode into the expected envelope.
    #[error("could not decode catalog response from {url}: {source}")]
    Format {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Schema creation, transaction, or row insert failure. Any in-flight
    /// transaction has been rolled back by the time this surfaces.
    #[error("store operation '{op}' failed: {source}")]
    Persistence {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl Error {
    pub(crate) fn persistence(op: &'static str) -> impl FnOnce(sqlx::Error) -> Error {
        move |source| Error::Persistence { op, source }
    }
}
