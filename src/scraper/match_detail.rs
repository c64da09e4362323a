use chrono::NaiveDateTime;
use ::scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};

use crate::error::{Result, VlrError};
use crate::model::{MatchDetail, TeamDetail};
use crate::scraper::normalize::{
    decide_winner, normalize_score, parse_explicit_datetime, WINNER_SCORE_ORDERING,
};
use crate::scraper::{self, path_segment, select_text};

const UTC_TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[instrument(skip(client))]
pub(crate) async fn get_match(
    client: &reqwest::Client,
    base_url: &str,
    id: &str,
) -> Result<MatchDetail> {
    let url = format!("{base_url}/{id}");
    let body = scraper::get_document(client, &url)
        .await
        .map_err(|e| match e {
            VlrError::UnexpectedStatus { status, .. }
                if status == reqwest::StatusCode::NOT_FOUND =>
            {
                VlrError::MatchNotFound { id: id.to_string() }
            }
            e => e,
        })?;
    let detail = parse_match(&body, id)?;
    debug!(id, status = %detail.status, "parsed match detail");
    Ok(detail)
}

pub(crate) fn parse_match(html: &str, id: &str) -> Result<MatchDetail> {
    let document = Html::parse_document(html);

    let header_selector = Selector::parse("div.wf-card.match-header")?;
    let header = document
        .select(&header_selector)
        .next()
        .ok_or(VlrError::ElementNotFound {
            context: "match header (div.wf-card.match-header)",
        })?;

    let (utc_date, timestamp) = parse_date(&header)?;

    let vs_selector = Selector::parse("div.match-header-vs")?;
    let vs = header
        .select(&vs_selector)
        .next()
        .ok_or(VlrError::ElementNotFound {
            context: "match versus block (div.match-header-vs)",
        })?;

    let (name1, team1_id) = parse_team(&vs, "a.match-header-link.mod-1")?;
    let (name2, team2_id) = parse_team(&vs, "a.match-header-link.mod-2")?;

    let note_selector = Selector::parse(".match-header-vs-note")?;
    let upcoming_selector = Selector::parse(".mod-upcoming")?;
    let is_upcoming = vs.select(&upcoming_selector).next().is_some();
    let status = if is_upcoming {
        "upcoming".to_string()
    } else {
        select_text(&vs, &note_selector).to_lowercase()
    };

    let [score1, score2] = parse_spoiler_scores(&vs, id)?;

    let (won1, won2) = if !is_upcoming && status == "final" {
        let (won1, won2) = decide_winner(
            score1.as_deref().unwrap_or_default(),
            score2.as_deref().unwrap_or_default(),
            WINNER_SCORE_ORDERING,
        );
        (Some(won1), Some(won2))
    } else {
        (None, None)
    };

    Ok(MatchDetail {
        id: id.to_string(),
        teams: [
            TeamDetail {
                name: name1,
                id: team1_id,
                score: score1,
                won: won1,
            },
            TeamDetail {
                name: name2,
                id: team2_id,
                score: score2,
                won: won2,
            },
        ],
        status,
        event: None,
        tournament: None,
        img: None,
        utc_date,
        timestamp,
    })
}

/// The header shows the date and the time in two separate nodes; the first
/// also carries the machine readable UTC timestamp.
fn parse_date(header: &ElementRef) -> Result<(String, Option<i64>)> {
    let date_selector =
        Selector::parse("div.match-header-super div.match-header-date .moment-tz-convert")?;
    let nodes = header.select(&date_selector).collect::<Vec<_>>();
    let (first, last) = match (nodes.first(), nodes.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(VlrError::ElementNotFound {
                context: "match date (moment-tz-convert)",
            })
        }
    };

    let text = |e: &ElementRef| e.text().collect::<String>().trim().to_string();
    let utc_date = format!("{}, {}", text(first), text(last));

    let timestamp = first
        .value()
        .attr("data-utc-ts")
        .and_then(|ts| NaiveDateTime::parse_from_str(ts, UTC_TS_FORMAT).ok())
        .or_else(|| parse_explicit_datetime(&format!("{} {}", text(first), text(last))))
        .map(|dt| dt.and_utc().timestamp());

    Ok((utc_date, timestamp))
}

/// Name and team id of the team link matching `link`. A missing link (e.g. a
/// TBD slot) yields an empty name and no id.
fn parse_team(vs: &ElementRef, link: &str) -> Result<(String, Option<String>)> {
    let link_selector = Selector::parse(link)?;
    let name_selector = Selector::parse(".wf-title-med")?;
    let Some(link) = vs.select(&link_selector).next() else {
        return Ok((String::new(), None));
    };
    let name = select_text(&link, &name_selector);
    let id = link
        .value()
        .attr("href")
        .and_then(|href| path_segment(href, 2))
        .map(str::to_string);
    Ok((name, id))
}

/// The spoiler container holds `score1 : score2` as a flat run of spans where
/// every second span is the separator.
fn parse_spoiler_scores(vs: &ElementRef, id: &str) -> Result<[Option<String>; 2]> {
    let spoiler_selector = Selector::parse(".js-spoiler span")?;
    let spans = vs
        .select(&spoiler_selector)
        .map(|s| s.text().collect::<String>())
        .collect::<Vec<_>>();
    match spans.as_slice() {
        [score1, _separator, score2, ..] => Ok([normalize_score(score1), normalize_score(score2)]),
        [] => Ok([None, None]),
        [score1, rest @ ..] => {
            warn!(id, spans = rest.len() + 1, "unexpected score spoiler shape");
            Ok([normalize_score(score1), None])
        }
    }
}
