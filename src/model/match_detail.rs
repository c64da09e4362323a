use serde::Serialize;

/// Header details of a single match page.
///
/// `event`, `tournament` and `img` are kept for parity with [`MatchSummary`]
/// but are never filled from a match page.
///
/// [`MatchSummary`]: crate::model::MatchSummary
#[derive(Debug, Clone, Serialize)]
pub struct MatchDetail {
    pub id: String,
    pub teams: [TeamDetail; 2],
    pub status: String,
    pub event: Option<String>,
    pub tournament: Option<String>,
    pub img: Option<String>,
    #[serde(rename = "utcDate")]
    pub utc_date: String,
    pub timestamp: Option<i64>,
}

/// A team as shown in the match header.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TeamDetail {
    pub name: String,
    pub id: Option<String>,
    pub score: Option<String>,
    /// Only set once the match is final.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub won: Option<bool>,
}
