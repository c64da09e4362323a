use chrono::{DateTime, Utc};
use serde::Serialize;

/// All matches currently listed on the matches index page.
#[derive(Debug, Clone, Serialize)]
pub struct MatchList {
    pub size: usize,
    pub matches: Vec<MatchSummary>,
    /// Entries that were present on the page but could not be extracted.
    pub skipped: usize,
}

impl MatchList {
    pub fn new(matches: Vec<MatchSummary>, skipped: usize) -> Self {
        Self {
            size: matches.len(),
            matches,
            skipped,
        }
    }
}

/// Summary of a single upcoming, live or recently finished match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub id: String,
    pub teams: [TeamSummary; 2],
    pub status: String,
    pub event: String,
    pub tournament: String,
    pub img: Option<String>,
    /// Relative start label exactly as shown on the page ("in 5m", "LIVE").
    #[serde(rename = "in")]
    pub eta: String,
    pub timestamp: Option<i64>,
    #[serde(rename = "utcDate")]
    pub utc_date: Option<String>,
    pub utc: Option<DateTime<Utc>>,
}

/// Team info as shown in a match index entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TeamSummary {
    pub name: String,
    pub country: Option<String>,
    pub score: Option<String>,
}
