//! Pure helpers turning scraped text fragments into typed values.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use itertools::Itertools;

/// Placeholder shown instead of a score before a match starts.
const SCORE_PLACEHOLDER: &str = "–";

/// Marker for images hosted by vlr.gg itself rather than its CDN.
const INTERNAL_ASSET_MARKER: &str = "/img/vlr";

const DATE_HEADER_FORMAT: &str = "%a, %B %e, %Y";
const DATE_HEADER_FORMAT_ALT: &str = "%a, %b %e, %Y";
const ENTRY_TIME_FORMAT: &str = "%I:%M %p";
const EXPLICIT_DATETIME_FORMAT: &str = "%a, %B %e, %Y %I:%M %p";
const UTC_DISPLAY_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// How two raw score tokens are compared to decide the winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOrdering {
    /// Compare as integers; falls back to `Lexical` if either token is not one.
    Numeric,
    /// Compare the raw strings, so "2" beats "10".
    Lexical,
}

/// Ordering used for final matches. Equal scores always go to the second team.
pub const WINNER_SCORE_ORDERING: ScoreOrdering = ScoreOrdering::Numeric;

/// An absolute match start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTime {
    pub utc: DateTime<Utc>,
}

impl ScheduledTime {
    pub fn timestamp(&self) -> i64 {
        self.utc.timestamp()
    }

    /// Human readable form, e.g. `Mon, 19 Oct 2026 14:00:00 GMT`.
    pub fn utc_date(&self) -> String {
        self.utc.format(UTC_DISPLAY_FORMAT).to_string()
    }
}

/// `None` for the not-started placeholder (or nothing at all), otherwise the
/// token as-is. Scores are not coerced to numbers.
pub fn normalize_score(token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() || token == SCORE_PLACEHOLDER {
        None
    } else {
        Some(token.to_string())
    }
}

/// Split a blob holding one value per line (two team names, two scores) into
/// its first two non-empty lines.
pub fn split_pair(blob: &str) -> Option<(String, String)> {
    blob.replace('\t', "")
        .trim()
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .next_tuple()
}

pub fn parse_scores(blob: &str) -> [Option<String>; 2] {
    let mut tokens = blob
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(normalize_score);
    [tokens.next().flatten(), tokens.next().flatten()]
}

/// Country code from a flag's class attribute, e.g. `"flag mod-kr"` → `"kr"`.
pub fn country_code(class_attr: Option<&str>) -> Option<String> {
    let code = class_attr?.split_whitespace().nth(1)?;
    let code = code.strip_prefix("mod-").unwrap_or(code);
    (!code.is_empty()).then(|| code.to_string())
}

/// Make an image `src` absolute. Site assets are prefixed with `base_url`,
/// anything else is assumed to be protocol-relative.
pub fn normalize_img_url(base_url: &str, src: &str) -> String {
    if src.contains(INTERNAL_ASSET_MARKER) {
        format!("{base_url}{src}")
    } else {
        format!("https:{src}")
    }
}

/// Combine a date header, an entry's local time label and the timezone the
/// page is rendered in into an absolute time.
///
/// A header reading `Today` has the literal removed; when nothing is left,
/// `today` is used as the date.
pub fn derive_timestamp(
    date_label: &str,
    time_label: &str,
    timezone: Tz,
    today: NaiveDate,
) -> Option<ScheduledTime> {
    let date_label = date_label.replace("Today", "");
    let date_label = date_label.trim();
    let date = if date_label.is_empty() {
        today
    } else {
        NaiveDate::parse_from_str(date_label, DATE_HEADER_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(date_label, DATE_HEADER_FORMAT_ALT))
            .ok()?
    };
    let time = NaiveTime::parse_from_str(time_label.trim(), ENTRY_TIME_FORMAT).ok()?;
    let local = date.and_time(time);

    // ambiguous times (DST fall-back) take the earlier instant; skipped ones fail
    let utc = timezone
        .from_local_datetime(&local)
        .earliest()?
        .with_timezone(&Utc);
    Some(ScheduledTime { utc })
}

/// Parse a fully spelled-out UTC date-time such as `Sat, July 20, 2024 3:00 AM`.
pub fn parse_explicit_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDateTime::parse_from_str(&value, EXPLICIT_DATETIME_FORMAT).ok()
}

/// Returns `(team1_won, team2_won)`. Exactly one is `true`.
pub fn decide_winner(score1: &str, score2: &str, ordering: ScoreOrdering) -> (bool, bool) {
    let cmp = match ordering {
        ScoreOrdering::Numeric => match (score1.parse::<u32>(), score2.parse::<u32>()) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            _ => score1.cmp(score2),
        },
        ScoreOrdering::Lexical => score1.cmp(score2),
    };
    let team1_won = cmp == Ordering::Greater;
    (team1_won, !team1_won)
}
