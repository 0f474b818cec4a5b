//! Remote catalog fetcher.
//!
//! One invocation issues exactly one POST to the catalog's search endpoint
//! and decodes the enveloped response shape: an object carrying a `hits`
//! array whose items use the catalog's long-form field names
//! (`long_description`, `small_logo_thumb_url`, `all_locations`). The flat
//! array shape some older clients consumed is not supported.
//!
//! No retry, no pagination, no timeout beyond the configured default.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::CatalogConfig;
use crate::error::Error;
use crate::models::OrgRecord;

/// The fetch seam: given a batch identifier, return the full list of
/// matching records or fail. [`CatalogClient`] is the one concrete binding;
/// tests substitute stubs.
#[async_trait]
pub trait FetchBatch: Send + Sync {
    async fn fetch_batch(&self, batch: &str) -> Result<Vec<OrgRecord>, Error>;
}

/// HTTP client for the catalog service.
pub struct CatalogClient {
    client: reqwest::Client,
    endpoint: String,
    app_id: String,
    api_key: String,
    hits_per_page: u32,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| Error::Transport {
                url: config.endpoint.clone(),
                source,
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            app_id: config.app_id.clone(),
            api_key: config.api_key.clone(),
            hits_per_page: config.hits_per_page,
        })
    }
}

#[async_trait]
impl FetchBatch for CatalogClient {
    async fn fetch_batch(&self, batch: &str) -> Result<Vec<OrgRecord>, Error> {
        if batch.is_empty() {
            return Err(Error::Input(
                "batch identifier must not be empty".to_string(),
            ));
        }

        let body = serde_json::json!({
            "query": "",
            "hitsPerPage": self.hits_per_page,
            "filters": format!("batch:\"{}\"", batch),
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("X-Algolia-Application-Id", &self.app_id)
            .header("X-Algolia-API-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| Error::Transport {
                url: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Remote {
                status,
                url: self.endpoint.clone(),
            });
        }

        let raw = response
            .bytes()
            .await
            .map_err(|source| Error::Transport {
                url: self.endpoint.clone(),
                source,
            })?;

        parse_catalog_response(&raw, &self.endpoint)
    }
}

/// Envelope returned by the catalog's search endpoint.
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    hits: Vec<CatalogHit>,
}

/// One record in the catalog's own field naming.
#[derive(Debug, Deserialize)]
struct CatalogHit {
    #[serde(default)]
    name: String,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    long_description: String,
    #[serde(default)]
    batch: String,
    #[serde(default)]
    small_logo_thumb_url: String,
    #[serde(default)]
    website: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    all_locations: String,
}

impl From<CatalogHit> for OrgRecord {
    fn from(hit: CatalogHit) -> Self {
        OrgRecord {
            name: hit.name,
            slug: hit.slug,
            description: hit.long_description,
            batch: hit.batch,
            logo_url: hit.small_logo_thumb_url,
            website_url: hit.website,
            tags: hit.tags,
            location: hit.all_locations,
        }
    }
}

/// Decode the response body into records. A decode failure aborts the
/// whole fetch; no partial results are surfaced.
fn parse_catalog_response(raw: &[u8], url: &str) -> Result<Vec<OrgRecord>, Error> {
    let envelope: CatalogResponse =
        serde_json::from_slice(raw).map_err(|source| Error::Format {
            url: url.to_string(),
            source,
        })?;

    Ok(envelope.hits.into_iter().map(OrgRecord::from).collect())
}
