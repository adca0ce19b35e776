use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::models::{MatchPhase, RawMatch, UpcomingEntry};

/// Match formats eligible for the completed-match summary.
const RECOGNIZED_FORMATS: [&str; 4] = ["T20", "T20I", "ODI", "TEST"];

pub const TBC_TEAM: &str = "Tbc";
pub const VENUE_TBD: &str = "Venue TBD";
pub const DEFAULT_FORMAT: &str = "T20";

/// First in-progress match in provider order. Malformed entries are
/// tolerated here; the normalizer is the one that rejects them.
pub fn select_live(matches: &[RawMatch]) -> Option<&RawMatch> {
    matches.iter().find(|m| m.phase() == MatchPhase::Live)
}

/// Most recently scheduled finished match of a recognized format.
/// The sort is stable, so among equal timestamps the earliest provider
/// entry wins.
pub fn select_last_completed(matches: &[RawMatch]) -> Option<&RawMatch> {
    let mut candidates: Vec<&RawMatch> = matches
        .iter()
        .filter(|m| m.phase() == MatchPhase::Completed && has_recognized_format(m))
        .collect();
    candidates.sort_by_key(|m| std::cmp::Reverse(scheduled_or_epoch(m)));
    candidates.first().copied()
}

/// Not-yet-started matches with a usable date, as schedule lines, with
/// the known fixtures prepended. A fixture is suppressed when a provider
/// entry already carries its exact date-time.
pub fn collect_upcoming(matches: &[RawMatch], known_fixtures: &[UpcomingEntry]) -> Vec<UpcomingEntry> {
    let scheduled: Vec<UpcomingEntry> = matches
        .iter()
        .filter(|m| m.phase() == MatchPhase::NotStarted)
        .filter_map(|m| m.scheduled_at().map(|date| upcoming_entry(m, date)))
        .collect();

    let mut entries: Vec<UpcomingEntry> = known_fixtures
        .iter()
        .filter(|f| !scheduled.iter().any(|e| e.date == f.date))
        .cloned()
        .collect();
    entries.extend(scheduled);
    entries
}

fn has_recognized_format(m: &RawMatch) -> bool {
    m.match_type
        .as_deref()
        .map(|f| RECOGNIZED_FORMATS.contains(&f.trim().to_uppercase().as_str()))
        .unwrap_or(false)
}

/// Total order for recency: missing or unparsable date-times sort at the
/// Unix epoch, i.e. oldest.
fn scheduled_or_epoch(m: &RawMatch) -> DateTime<Utc> {
    m.scheduled_at()
        .and_then(parse_schedule)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Accepts RFC 3339, bare `YYYY-MM-DDTHH:MM:SS`, and bare `YYYY-MM-DD`.
pub fn parse_schedule(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_time(NaiveTime::MIN).and_utc());
    }
    None
}

fn upcoming_entry(m: &RawMatch, date: &str) -> UpcomingEntry {
    let teams = if m.team_info.len() >= 2 {
        [m.team_info[0].name.clone(), m.team_info[1].name.clone()]
    } else {
        [TBC_TEAM.to_string(), TBC_TEAM.to_string()]
    };
    let match_type = m
        .match_type
        .as_deref()
        .map(|f| f.trim().to_uppercase())
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| DEFAULT_FORMAT.to_string());
    let venue = m
        .venue
        .clone()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| VENUE_TBD.to_string());
    UpcomingEntry {
        teams,
        match_type,
        date: date.to_string(),
        venue,
    }
}
