use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

/// Connection settings for the remote catalog service.
///
/// Credentials live here (or in the `CATALOG_API_KEY` environment variable)
/// rather than in source, so tests can point the fetcher at a mock endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub endpoint: String,
    pub app_id: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_hits_per_page")]
    pub hits_per_page: u32,
    #[serde(default = "default_catalog_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_hits_per_page() -> u32 {
    1000
}
fn default_catalog_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct EnrichmentConfig {
    #[serde(default = "default_enrichment_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_enrichment_timeout_secs(),
        }
    }
}

fn default_enrichment_timeout_secs() -> u64 {
    10
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Environment takes precedence over the file for the credential
    if let Ok(key) = std::env::var("CATALOG_API_KEY") {
        if !key.is_empty() {
            config.catalog.api_key = key;
        }
    }

    if config.catalog.endpoint.is_empty() {
        anyhow::bail!("catalog.endpoint must not be empty");
    }
    if config.catalog.app_id.is_empty() {
        anyhow::bail!("catalog.app_id must not be empty");
    }
    if config.catalog.api_key.is_empty() {
        anyhow::bail!("catalog.api_key must be set in the config file or via CATALOG_API_KEY");
    }
    if config.catalog.hits_per_page == 0 {
        anyhow::bail!("catalog.hits_per_page must be > 0");
    }
    if config.catalog.timeout_secs == 0 {
        anyhow::bail!("catalog.timeout_secs must be > 0");
    }
    if config.enrichment.timeout_secs == 0 {
        anyhow::bail!("enrichment.timeout_secs must be > 0");
    }

    Ok(config)
}
