use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::summary::models::ScoreReport;

/// Write the report as a pretty-printed JSON document.
pub fn write_report(path: &Path, report: &ScoreReport) -> Result<()> {
    let json =
        serde_json::to_string_pretty(report).context("Failed to serialize score report")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
