//! Best-effort contact enrichment from an organization's public website.
//!
//! Fetches the page, pulls a one-line summary from the meta description
//! (falling back to `og:description`, then the first paragraph) and the
//! first email-shaped substring in the raw body. Callers treat any failure
//! here as a warning; nothing in this module is load-bearing.

use anyhow::{bail, Context, Result};
use regex::Regex;
use scraper::{Html, Selector};

use crate::config::EnrichmentConfig;

/// Whatever the scrape could find; both fields may be absent.
#[derive(Debug, Clone, Default)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub summary: Option<String>,
}

/// Fetch and scrape `url` for contact data.
pub async fn fetch_contact_info(config: &EnrichmentConfig, url: &str) -> Result<ContactInfo> {
    if url.is_empty() {
        bail!("record has no website URL");
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_secs))
        .build()?;

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to fetch website {}", url))?;

    let status = response.status();
    if !status.is_success() {
        bail!("website {} answered with status {}", url, status);
    }

    let body = response
        .text()
        .await
        .with_context(|| format!("failed to read website {}", url))?;

    Ok(scrape_contact_info(&body))
}

/// Pure scrape over an HTML body.
fn scrape_contact_info(body: &str) -> ContactInfo {
    let document = Html::parse_document(body);

    let summary = meta_content(&document, "meta[name='description']")
        .or_else(|| meta_content(&document, "meta[property='og:description']"))
        .or_else(|| first_paragraph(&document));

    ContactInfo {
        email: first_email(body),
        summary,
    }
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_paragraph(document: &Html) -> Option<String> {
    let selector = Selector::parse("p").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn first_email(body: &str) -> Option<String> {
    // Same shape the original lookup matched; compiled once per scrape,
    // which runs at most once per program invocation.
    let re = Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").ok()?;
    re.find(body).map(|m| m.as_str().to_string())
}
