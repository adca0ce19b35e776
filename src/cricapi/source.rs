use anyhow::Result;
use async_trait::async_trait;

use crate::summary::models::RawMatch;

/// Trait that every match-data source must implement.
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// Return the provider's current (potentially live) matches.
    async fn fetch_current_matches(&self) -> Result<Vec<RawMatch>>;

    /// Return the provider's general match list, truncated to `limit`.
    async fn fetch_all_matches(&self, limit: usize) -> Result<Vec<RawMatch>>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
