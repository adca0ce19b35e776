pub mod models;
pub mod normalize;
pub mod select;

pub use models::{MatchSummary, RawMatch, ScoreReport, UpcomingEntry, NO_DATA_MESSAGE};
pub use normalize::{normalize, SummaryKind};
pub use select::{collect_upcoming, select_last_completed, select_live};

use tracing::warn;

use crate::cricapi::MatchSource;

/// Resolve the reportable summary from already-fetched match lists.
///
/// Stages run in order (live, then last completed, then the upcoming
/// schedule) and the first stage that produces a usable summary wins.
/// A malformed record fails its stage, not the whole chain.
pub fn resolve_summary(
    live: &[RawMatch],
    all: &[RawMatch],
    known_fixtures: &[UpcomingEntry],
) -> MatchSummary {
    if let Some(m) = select_live(live) {
        match normalize(m, SummaryKind::Live) {
            Ok(summary) => return summary,
            Err(e) => warn!("Skipping live match '{}': {}", label(m), e),
        }
    }

    if let Some(m) = select_last_completed(all) {
        match normalize(m, SummaryKind::Completed) {
            Ok(summary) => return summary,
            Err(e) => warn!("Skipping completed match '{}': {}", label(m), e),
        }
    }

    let upcoming = collect_upcoming(all, known_fixtures);
    if !upcoming.is_empty() {
        return MatchSummary::Upcoming(upcoming);
    }

    MatchSummary::not_found()
}

fn label(m: &RawMatch) -> &str {
    m.name
        .as_deref()
        .or(m.id.as_deref())
        .unwrap_or("<unnamed>")
}

/// Fetch-and-resolve entry point. The general match list is fetched only
/// when the live list yields no usable summary. Fetch failures are logged
/// and treated as empty lists; the caller always receives a well-formed
/// summary.
pub async fn fetch_summary(
    source: &dyn MatchSource,
    known_fixtures: &[UpcomingEntry],
    limit: usize,
) -> MatchSummary {
    let live = match source.fetch_current_matches().await {
        Ok(matches) => matches,
        Err(e) => {
            warn!("Live match fetch from {} failed: {:#}", source.name(), e);
            Vec::new()
        }
    };

    if select_live(&live).is_some() {
        let summary = resolve_summary(&live, &[], &[]);
        if !summary.is_not_found() {
            return summary;
        }
        // The live candidate was malformed; fall back to the full list.
    }

    let all = match source.fetch_all_matches(limit).await {
        Ok(matches) => matches,
        Err(e) => {
            warn!("Match list fetch from {} failed: {:#}", source.name(), e);
            Vec::new()
        }
    };

    resolve_summary(&live, &all, known_fixtures)
}
