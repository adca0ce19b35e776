use anyhow::Context;
use clap::Parser;

use crate::summary::models::UpcomingEntry;

/// Cricket live-score service
#[derive(Parser, Debug, Clone)]
#[command(name = "cricscore", version, about)]
pub struct Config {
    /// CricAPI credential (required for all provider fetches)
    #[arg(long, env = "CRICAPI_KEY")]
    pub api_key: Option<String>,

    /// CricAPI base URL
    #[arg(long, env = "CRICAPI_URL", default_value = "https://api.cricapi.com/v1")]
    pub api_url: String,

    /// HTTP listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:3000")]
    pub listen_addr: String,

    /// Where run-once mode writes the score report
    #[arg(long, env = "OUTPUT_PATH", default_value = "score.json")]
    pub output_path: String,

    /// Maximum number of entries taken from the general match list
    #[arg(long, env = "MATCH_LIMIT", default_value = "25")]
    pub match_limit: usize,

    /// Resolve one summary, write it to the output path, and exit
    #[arg(long, env = "RUN_ONCE", default_value = "false")]
    pub once: bool,

    /// JSON file holding known-fixture overrides for the upcoming
    /// schedule; a built-in list is used when unset
    #[arg(long, env = "KNOWN_FIXTURES_PATH")]
    pub known_fixtures_path: Option<String>,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.as_deref().map(str::trim).unwrap_or("").is_empty() {
            anyhow::bail!("CRICAPI_KEY is required. Request a key at https://cricapi.com and export it.");
        }
        if self.match_limit == 0 {
            anyhow::bail!("match_limit must be positive");
        }
        Ok(())
    }

    /// Known-fixture overrides: the configured file, or the built-in list.
    pub fn known_fixtures(&self) -> anyhow::Result<Vec<UpcomingEntry>> {
        match &self.known_fixtures_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read known fixtures from {path}"))?;
                let fixtures: Vec<UpcomingEntry> = serde_json::from_str(&raw)
                    .with_context(|| format!("Failed to parse known fixtures from {path}"))?;
                Ok(fixtures)
            }
            None => Ok(default_known_fixtures()),
        }
    }
}

/// Marquee fixtures the provider has been seen to omit from its schedule.
/// Currently the 2027 World Cup final, pairings still to be decided.
pub fn default_known_fixtures() -> Vec<UpcomingEntry> {
    vec![UpcomingEntry {
        teams: ["Tbc".to_string(), "Tbc".to_string()],
        match_type: "ODI".to_string(),
        date: "2027-11-14T09:00:00".to_string(),
        venue: "The Wanderers Stadium, Johannesburg".to_string(),
    }]
}
