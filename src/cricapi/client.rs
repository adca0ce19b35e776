use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::source::MatchSource;
use crate::summary::models::RawMatch;

/// Client for the CricAPI v1 match endpoints.
/// Docs: <https://cricketdata.org/how-to-use-cricket-data-api.aspx>
#[derive(Clone)]
pub struct CricApiClient {
    http: Client,
    api_key: String,
    /// Base URL for overriding in tests
    base_url: String,
}

impl CricApiClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(CricApiClient {
            http,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_matches(&self, endpoint: &str) -> Result<Vec<RawMatch>> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("Fetching matches from {}", url);

        let resp = self
            .http
            .get(&url)
            .query(&[("apikey", self.api_key.as_str()), ("offset", "0")])
            .send()
            .await
            .context("CricAPI request failed")?;

        if !resp.status().is_success() {
            anyhow::bail!("CricAPI error: {}", resp.status());
        }

        let raw: serde_json::Value = resp
            .json()
            .await
            .context("Failed to parse CricAPI response")?;

        parse_matches_response(&raw)
    }
}

#[async_trait]
impl MatchSource for CricApiClient {
    fn name(&self) -> &str {
        "CricAPI"
    }

    async fn fetch_current_matches(&self) -> Result<Vec<RawMatch>> {
        self.fetch_matches("currentMatches").await
    }

    async fn fetch_all_matches(&self, limit: usize) -> Result<Vec<RawMatch>> {
        let mut matches = self.fetch_matches("matches").await?;
        matches.truncate(limit);
        Ok(matches)
    }
}

/// Parse the `{ status, data }` envelope shared by the CricAPI endpoints.
/// Entries that fail to decode are skipped, never abort the batch.
fn parse_matches_response(raw: &serde_json::Value) -> Result<Vec<RawMatch>> {
    let status = raw["status"].as_str().unwrap_or("failure");
    if status != "success" {
        anyhow::bail!("CricAPI reported status {:?}", status);
    }

    let data = match raw["data"].as_array() {
        Some(a) => a,
        None => return Ok(vec![]),
    };

    let matches = data
        .iter()
        .filter_map(|entry| match serde_json::from_value::<RawMatch>(entry.clone()) {
            Ok(m) => Some(m),
            Err(e) => {
                debug!("Skipping undecodable match entry: {}", e);
                None
            }
        })
        .collect();

    Ok(matches)
}
