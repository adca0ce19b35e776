use super::models::{MatchSummary, RawMatch, Scorecard, SummaryError};

/// Which summary variant the normalizer should build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    Live,
    Completed,
}

/// Convert one raw provider record into a canonical summary.
///
/// Teams are taken positionally (index 0, index 1); runs and wickets come
/// from the innings entry of the same index, defaulting to 0 when the
/// entry is missing or non-numeric. Overs are read from the first innings
/// entry only, so the second side's overs are not represented (preserved
/// provider-era behavior, pinned by a test).
///
/// A record with fewer than two team entries fails with
/// `SummaryError::MalformedRecord`; entries beyond the first two are
/// ignored.
pub fn normalize(raw: &RawMatch, kind: SummaryKind) -> Result<MatchSummary, SummaryError> {
    if raw.team_info.len() < 2 {
        return Err(SummaryError::MalformedRecord {
            found: raw.team_info.len(),
        });
    }

    let teams = [raw.team_info[0].name.clone(), raw.team_info[1].name.clone()];
    let runs = [innings_runs(raw, 0), innings_runs(raw, 1)];
    let wickets = [innings_wickets(raw, 0), innings_wickets(raw, 1)];
    let overs = raw.score.first().map(|s| s.overs()).unwrap_or(0.0);

    let (match_type, result) = match kind {
        SummaryKind::Live => (None, None),
        SummaryKind::Completed => (
            Some(raw.match_type.clone().unwrap_or_default().to_uppercase()),
            Some(raw.status.clone().unwrap_or_default()),
        ),
    };

    let card = Scorecard {
        teams,
        runs,
        wickets,
        overs,
        match_type,
        result,
    };

    Ok(match kind {
        SummaryKind::Live => MatchSummary::Live(card),
        SummaryKind::Completed => MatchSummary::Completed(card),
    })
}

fn innings_runs(raw: &RawMatch, idx: usize) -> u32 {
    raw.score.get(idx).map(|s| s.runs()).unwrap_or(0)
}

fn innings_wickets(raw: &RawMatch, idx: usize) -> u32 {
    raw.score.get(idx).map(|s| s.wickets()).unwrap_or(0)
}
