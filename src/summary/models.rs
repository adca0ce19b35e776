use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Fixed message emitted when every fallback stage comes up empty.
pub const NO_DATA_MESSAGE: &str = "No live, completed, or upcoming matches available";

/// Raw match record as returned by the score provider. Every field is
/// optional; provider versions disagree on which ones they send.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawMatch {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "matchType")]
    pub match_type: Option<String>,
    pub status: Option<String>,
    pub venue: Option<String>,
    /// Scheduled date; older provider versions send only this.
    pub date: Option<String>,
    #[serde(rename = "dateTimeGMT")]
    pub date_time_gmt: Option<String>,
    #[serde(rename = "teamInfo")]
    pub team_info: Vec<TeamInfo>,
    pub score: Vec<InningsScore>,
}

impl RawMatch {
    pub fn phase(&self) -> MatchPhase {
        match self.status.as_deref() {
            Some(s) => MatchPhase::from_status(s),
            None => MatchPhase::Other,
        }
    }

    /// The scheduled date-time under whichever field the provider used.
    pub fn scheduled_at(&self) -> Option<&str> {
        [self.date_time_gmt.as_deref(), self.date.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TeamInfo {
    pub name: String,
}

/// Per-innings batting entry. Numeric fields arrive as numbers or digit
/// strings depending on provider version, so they are held raw and
/// coerced on access.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InningsScore {
    #[serde(rename = "inningScore", alias = "r")]
    pub inning_score: Option<Value>,
    #[serde(alias = "w")]
    pub wickets: Option<Value>,
    #[serde(alias = "o")]
    pub overs: Option<Value>,
}

impl InningsScore {
    pub fn runs(&self) -> u32 {
        coerce_u32(self.inning_score.as_ref())
    }

    pub fn wickets(&self) -> u32 {
        coerce_u32(self.wickets.as_ref())
    }

    pub fn overs(&self) -> f64 {
        coerce_f64(self.overs.as_ref())
    }
}

fn coerce_u32(v: Option<&Value>) -> u32 {
    match v {
        Some(Value::Number(n)) => n.as_u64().map(|n| n as u32).unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn coerce_f64(v: Option<&Value>) -> f64 {
    match v {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Lifecycle phase derived from the provider's status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Live,
    Completed,
    NotStarted,
    Other,
}

impl MatchPhase {
    pub fn from_status(s: &str) -> MatchPhase {
        match s.trim().to_lowercase().as_str() {
            "live" => MatchPhase::Live,
            "completed" | "finished" => MatchPhase::Completed,
            "notstarted" | "scheduled" => MatchPhase::NotStarted,
            _ => MatchPhase::Other,
        }
    }
}

/// Normalized two-team scorecard. Index `i` of `runs`/`wickets`
/// corresponds to `teams[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub teams: [String; 2],
    pub runs: [u32; 2],
    pub wickets: [u32; 2],
    /// Overs bowled, taken from the first innings entry only.
    pub overs: f64,
    pub match_type: Option<String>,
    pub result: Option<String>,
}

/// A single schedule line of the upcoming-matches summary. Also the shape
/// of the known-fixture overrides supplied via configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingEntry {
    pub teams: [String; 2],
    #[serde(rename = "matchType")]
    pub match_type: String,
    pub date: String,
    pub venue: String,
}

/// Canonical output of the fallback chain.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchSummary {
    Live(Scorecard),
    Completed(Scorecard),
    Upcoming(Vec<UpcomingEntry>),
    NotFound { message: String },
}

impl MatchSummary {
    pub fn not_found() -> MatchSummary {
        MatchSummary::NotFound {
            message: NO_DATA_MESSAGE.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MatchSummary::NotFound { .. })
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SummaryError {
    /// The provider record is missing the two-team structure required to
    /// build a scorecard.
    #[error("malformed match record: expected 2 teams, found {found}")]
    MalformedRecord { found: usize },
}

/// Wire shape persisted to disk and served over HTTP. Field presence
/// depends on the summary kind.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub message: String,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_body: Option<MatchBody>,
    #[serde(rename = "upcomingMatches", skip_serializing_if = "Option::is_none")]
    pub upcoming_matches: Option<Vec<UpcomingEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The `match` section of a live or completed report. `score` and
/// `wickets` are JSON objects keyed by team name in team-index order.
#[derive(Debug, Clone, Serialize)]
pub struct MatchBody {
    pub teams: [String; 2],
    pub score: Map<String, Value>,
    pub overs: f64,
    pub wickets: Map<String, Value>,
    #[serde(rename = "matchType", skip_serializing_if = "Option::is_none")]
    pub match_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl MatchBody {
    pub fn from_card(card: &Scorecard) -> MatchBody {
        let mut score = Map::new();
        let mut wickets = Map::new();
        for i in 0..2 {
            score.insert(card.teams[i].clone(), Value::from(card.runs[i]));
            wickets.insert(card.teams[i].clone(), Value::from(card.wickets[i]));
        }
        MatchBody {
            teams: card.teams.clone(),
            score,
            overs: card.overs,
            wickets,
            match_type: card.match_type.clone(),
            result: card.result.clone(),
        }
    }
}

impl ScoreReport {
    pub fn from_summary(summary: &MatchSummary) -> ScoreReport {
        match summary {
            MatchSummary::Live(card) => ScoreReport {
                message: "Live Match Score".to_string(),
                match_body: Some(MatchBody::from_card(card)),
                upcoming_matches: None,
                error: None,
            },
            MatchSummary::Completed(card) => ScoreReport {
                message: "Last Completed Match".to_string(),
                match_body: Some(MatchBody::from_card(card)),
                upcoming_matches: None,
                error: None,
            },
            MatchSummary::Upcoming(entries) => ScoreReport {
                message: "Upcoming Matches".to_string(),
                match_body: None,
                upcoming_matches: Some(entries.clone()),
                error: None,
            },
            MatchSummary::NotFound { message } => ScoreReport {
                message: message.clone(),
                match_body: None,
                upcoming_matches: None,
                error: Some(message.clone()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn test_phase_from_status_case_insensitive() {
        assert_eq!(MatchPhase::from_status("Live"), MatchPhase::Live);
        assert_eq!(MatchPhase::from_status("COMPLETED"), MatchPhase::Completed);
        assert_eq!(MatchPhase::from_status("Finished"), MatchPhase::Completed);
        assert_eq!(MatchPhase::from_status("notstarted"), MatchPhase::NotStarted);
        assert_eq!(MatchPhase::from_status("Scheduled"), MatchPhase::NotStarted);
        assert_eq!(MatchPhase::from_status("abandoned"), MatchPhase::Other);
    }

    #[test]
    fn test_innings_coercion_accepts_numbers_and_digit_strings() {
        let entry: InningsScore =
            serde_json::from_value(json!({ "inningScore": 187, "w": "4", "o": "19.3" })).unwrap();
        assert_eq!(entry.runs(), 187);
        assert_eq!(entry.wickets(), 4);
        assert_relative_eq!(entry.overs(), 19.3, epsilon = 1e-9);
    }

    #[test]
    fn test_innings_coercion_defaults_junk_to_zero() {
        let entry: InningsScore =
            serde_json::from_value(json!({ "inningScore": "n/a", "w": null })).unwrap();
        assert_eq!(entry.runs(), 0);
        assert_eq!(entry.wickets(), 0);
        assert_relative_eq!(entry.overs(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_raw_match_accepts_short_score_keys() {
        let m: RawMatch = serde_json::from_value(json!({
            "id": "m1",
            "status": "live",
            "score": [{ "r": 52, "w": 1, "o": 6.2 }]
        }))
        .unwrap();
        assert_eq!(m.score[0].runs(), 52);
        assert_eq!(m.score[0].wickets(), 1);
    }

    #[test]
    fn test_scheduled_at_prefers_gmt_field_and_skips_blanks() {
        let m: RawMatch = serde_json::from_value(json!({
            "date": "2026-08-10",
            "dateTimeGMT": "2026-08-10T14:30:00"
        }))
        .unwrap();
        assert_eq!(m.scheduled_at(), Some("2026-08-10T14:30:00"));

        let blank: RawMatch =
            serde_json::from_value(json!({ "dateTimeGMT": "  ", "date": "2026-08-10" })).unwrap();
        assert_eq!(blank.scheduled_at(), Some("2026-08-10"));
    }

    #[test]
    fn test_report_score_map_preserves_team_order() {
        let card = Scorecard {
            teams: ["Zimbabwe".to_string(), "Afghanistan".to_string()],
            runs: [240, 190],
            wickets: [7, 10],
            overs: 50.0,
            match_type: None,
            result: None,
        };
        let body = MatchBody::from_card(&card);
        let keys: Vec<&String> = body.score.keys().collect();
        assert_eq!(keys, ["Zimbabwe", "Afghanistan"]);

        let serialized = serde_json::to_string(&body).unwrap();
        let zim = serialized.find("Zimbabwe").unwrap();
        let afg = serialized.find("Afghanistan").unwrap();
        assert!(zim < afg);
    }

    #[test]
    fn test_not_found_report_carries_only_message_and_error() {
        let report = ScoreReport::from_summary(&MatchSummary::not_found());
        assert_eq!(report.message, NO_DATA_MESSAGE);
        assert_eq!(report.error.as_deref(), Some(NO_DATA_MESSAGE));
        assert!(report.match_body.is_none());
        assert!(report.upcoming_matches.is_none());

        let serialized = serde_json::to_string(&report).unwrap();
        assert!(!serialized.contains("\"match\""));
        assert!(!serialized.contains("upcomingMatches"));
    }
}
