use chrono::NaiveDate;
use chrono_tz::Tz;
use ::scraper::{CaseSensitivity, ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};

use crate::error::{Result, VlrError};
use crate::model::{MatchList, MatchSummary, TeamSummary};
use crate::scraper::normalize::{
    country_code, derive_timestamp, normalize_img_url, normalize_score,
};
use crate::scraper::{self, path_segment, select_all_text, select_text};

/// Everything besides the document needed to turn an entry into a summary.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ListContext<'a> {
    pub base_url: &'a str,
    pub timezone: Tz,
    /// Date substituted for a bare `Today` header.
    pub today: NaiveDate,
}

#[instrument(skip(client))]
pub(crate) async fn get_matches(
    client: &reqwest::Client,
    base_url: &str,
    timezone: Tz,
) -> Result<MatchList> {
    let url = format!("{base_url}/matches");
    let body = scraper::get_document(client, &url).await?;
    let today = chrono::Utc::now().with_timezone(&timezone).date_naive();
    let list = parse_matches(
        &body,
        &ListContext {
            base_url,
            timezone,
            today,
        },
    )?;
    debug!(count = list.size, skipped = list.skipped, "parsed match list");
    Ok(list)
}

pub(crate) fn parse_matches(html: &str, ctx: &ListContext) -> Result<MatchList> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("div.wf-label.mod-large, a.wf-module-item.match-item")?;
    let selectors = EntrySelectors::new()?;

    let mut matches = vec![];
    let mut skipped = 0;
    let mut index = 0;
    let mut date_label: Option<String> = None;
    for element in document.select(&selector) {
        if element
            .value()
            .has_class("wf-label", CaseSensitivity::CaseSensitive)
        {
            date_label = Some(element.text().collect());
            continue;
        }

        match parse_match_item(&element, &selectors, date_label.as_deref(), ctx) {
            Ok(item) => matches.push(item),
            Err(e) => {
                warn!(index, error = %e, "skipping unparsable match item");
                skipped += 1;
            }
        }
        index += 1;
    }
    Ok(MatchList::new(matches, skipped))
}

/// Selectors for the fields of one index entry, parsed once per page.
struct EntrySelectors {
    teams: Selector,
    team_name: Selector,
    flag: Selector,
    score: Selector,
    status: Selector,
    eta: Selector,
    event_series: Selector,
    event: Selector,
    icon: Selector,
    time: Selector,
}

impl EntrySelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            teams: Selector::parse("div.match-item-vs-team")?,
            team_name: Selector::parse(".match-item-vs-team-name")?,
            flag: Selector::parse(".flag")?,
            score: Selector::parse(".match-item-vs-team-score")?,
            status: Selector::parse(".ml-status")?,
            eta: Selector::parse(".ml-eta")?,
            event_series: Selector::parse(".match-item-event-series")?,
            event: Selector::parse(".match-item-event")?,
            icon: Selector::parse(".match-item-icon img")?,
            time: Selector::parse(".match-item-time")?,
        })
    }
}

fn parse_match_item(
    element: &ElementRef,
    selectors: &EntrySelectors,
    date_label: Option<&str>,
    ctx: &ListContext,
) -> Result<MatchSummary> {
    let id = element
        .value()
        .attr("href")
        .and_then(|href| path_segment(href, 1))
        .ok_or(VlrError::MissingField { field: "href" })?
        .to_string();

    let teams = element
        .select(&selectors.teams)
        .map(|team| parse_team(&team, selectors))
        .collect::<Result<Vec<_>>>()?;
    let teams: [TeamSummary; 2] = teams
        .try_into()
        .map_err(|_| VlrError::MissingField { field: "teams" })?;

    let status = select_text(element, &selectors.status);
    let eta = select_text(element, &selectors.eta);
    let event = select_text(element, &selectors.event_series);
    let tournament = select_all_text(element, &selectors.event)
        .replace('\t', "")
        .trim()
        .replacen(&event, "", 1)
        .trim()
        .replace('\n', "");

    let img = element
        .select(&selectors.icon)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|src| normalize_img_url(ctx.base_url, src));

    let time = select_text(element, &selectors.time);
    let scheduled =
        date_label.and_then(|date| derive_timestamp(date, &time, ctx.timezone, ctx.today));
    if scheduled.is_none() {
        debug!(id = %id, time = %time, date = ?date_label, "could not derive match start");
    }

    Ok(MatchSummary {
        id,
        teams,
        status,
        event,
        tournament,
        img,
        eta,
        timestamp: scheduled.map(|s| s.timestamp()),
        utc_date: scheduled.map(|s| s.utc_date()),
        utc: scheduled.map(|s| s.utc),
    })
}

/// Name, flag and score of one `div.match-item-vs-team`, each read from
/// within that team's own block.
fn parse_team(team: &ElementRef, selectors: &EntrySelectors) -> Result<TeamSummary> {
    let name = select_text(team, &selectors.team_name);
    if name.is_empty() {
        return Err(VlrError::MissingField { field: "team name" });
    }
    let country = team
        .select(&selectors.flag)
        .next()
        .and_then(|flag| country_code(flag.value().attr("class")));
    let score = team
        .select(&selectors.score)
        .next()
        .and_then(|score| normalize_score(&score.text().collect::<String>()));
    Ok(TeamSummary {
        name,
        country,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = include_str!("../../tests/fixtures/matches.html");

    fn ctx() -> ListContext<'static> {
        ListContext {
            base_url: "https://www.vlr.gg",
            timezone: Tz::UTC,
            today: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        }
    }

    #[test]
    fn test_parse_matches_fixture() {
        let list = parse_matches(FIXTURE, &ctx()).unwrap();
        assert_eq!(list.size, list.matches.len());
        assert_eq!(list.size, 3);
        assert_eq!(list.skipped, 1);

        let live = &list.matches[0];
        assert_eq!(live.id, "312345");
        assert_eq!(live.teams[0].name, "Sentinels");
        assert_eq!(live.teams[0].country.as_deref(), Some("us"));
        assert_eq!(live.teams[0].score.as_deref(), Some("1"));
        assert_eq!(live.teams[1].name, "LOUD");
        assert_eq!(live.teams[1].country.as_deref(), Some("br"));
        assert_eq!(live.teams[1].score.as_deref(), Some("0"));
        assert_eq!(live.status, "LIVE");
        assert_eq!(live.eta, "");
        assert_eq!(live.event, "Playoffs–Upper Final");
        assert_eq!(live.tournament, "Champions Tour 2026: Americas Stage 2");
        assert_eq!(
            live.img.as_deref(),
            Some("https://owcdn.net/img/640f5ae002674.png")
        );
        assert_eq!(live.timestamp, Some(1_792_425_600));
        assert_eq!(live.utc_date.as_deref(), Some("Mon, 19 Oct 2026 16:00:00 GMT"));

        let upcoming = &list.matches[1];
        assert_eq!(upcoming.id, "312346");
        assert_eq!(upcoming.teams[0].name, "Team A");
        assert_eq!(upcoming.teams[1].name, "Team B");
        assert_eq!(upcoming.teams[0].score, None);
        assert_eq!(upcoming.teams[1].score, None);
        assert_eq!(upcoming.teams[1].country, None);
        assert_eq!(upcoming.status, "Upcoming");
        assert_eq!(upcoming.eta, "in 2h 30m");
        assert_eq!(
            upcoming.img.as_deref(),
            Some("https://www.vlr.gg/img/vlr/tmp/vlr.png")
        );
        // time label "TBD" cannot be placed
        assert_eq!(upcoming.timestamp, None);
        assert_eq!(upcoming.utc_date, None);

        // next day header applies to the following card
        let tomorrow = &list.matches[2];
        assert_eq!(tomorrow.id, "312348");
        assert_eq!(tomorrow.timestamp, Some(1_792_425_600 + 24 * 3600 - 7 * 3600));
        assert_eq!(tomorrow.img, None);
    }

    #[test]
    fn test_every_match_has_two_teams_in_document_order() {
        let list = parse_matches(FIXTURE, &ctx()).unwrap();
        for m in &list.matches {
            assert_eq!(m.teams.len(), 2);
            assert!(!m.teams[0].name.is_empty());
            assert!(!m.teams[1].name.is_empty());
        }
        assert_eq!(list.matches[0].teams[1].name, "LOUD");
    }

    #[test]
    fn test_timezone_is_applied() {
        let berlin = ListContext {
            timezone: Tz::Europe__Berlin,
            ..ctx()
        };
        let utc = parse_matches(FIXTURE, &ctx()).unwrap();
        let local = parse_matches(FIXTURE, &berlin).unwrap();
        assert_eq!(
            local.matches[0].timestamp,
            utc.matches[0].timestamp.map(|t| t - 2 * 3600)
        );
    }

    #[test]
    fn test_entry_without_date_header() {
        let html = r#"<div class="wf-card">
            <a href="/1/a-vs-b" class="wf-module-item match-item">
                <div class="match-item-time">4:00 PM</div>
                <div class="match-item-vs">
                    <div class="match-item-vs-team">
                        <div class="match-item-vs-team-name">Team A</div>
                        <div class="match-item-vs-team-score">–</div>
                    </div>
                    <div class="match-item-vs-team">
                        <div class="match-item-vs-team-name">
	Team B</div>
                        <div class="match-item-vs-team-score">–</div>
                    </div>
                </div>
            </a>
        </div>"#;
        let list = parse_matches(html, &ctx()).unwrap();
        assert_eq!(list.size, 1);
        let m = &list.matches[0];
        assert_eq!(m.teams[0].name, "Team A");
        assert_eq!(m.teams[1].name, "Team B");
        assert_eq!(m.teams[0].score, None);
        assert_eq!(m.teams[1].score, None);
        assert_eq!(m.teams[0].country, None);
        assert_eq!(m.timestamp, None);
        assert_eq!(m.status, "");
    }

    #[test]
    fn test_compact_team_markup() {
        let html = concat!(
            r#"<a href="/2/a-vs-b" class="wf-module-item match-item">"#,
            r#"<div class="match-item-vs-team"><div class="match-item-vs-team-name">Team A</div>"#,
            r#"<div class="match-item-vs-team-score">–</div></div>"#,
            r#"<div class="match-item-vs-team"><div class="match-item-vs-team-name">Team B</div>"#,
            r#"<div class="match-item-vs-team-score">–</div></div>"#,
            r#"</a>"#,
        );
        let list = parse_matches(html, &ctx()).unwrap();
        assert_eq!(list.size, 1);
        let m = &list.matches[0];
        assert_eq!(m.teams[0].name, "Team A");
        assert_eq!(m.teams[1].name, "Team B");
        assert_eq!(m.teams[0].score, None);
        assert_eq!(m.teams[1].score, None);
    }

    #[test]
    fn test_team_fields_stay_with_their_team() {
        let html = r#"<a href="/3/a-vs-b" class="wf-module-item match-item">
            <div class="match-item-vs">
                <div class="match-item-vs-team">
                    <div class="match-item-vs-team-name">Team A</div>
                    <div class="match-item-vs-team-score"></div>
                </div>
                <div class="match-item-vs-team">
                    <div class="match-item-vs-team-name">
                        <span class="flag mod-br"></span>
                        Team B
                    </div>
                    <div class="match-item-vs-team-score">1</div>
                </div>
            </div>
        </a>"#;
        let list = parse_matches(html, &ctx()).unwrap();
        let m = &list.matches[0];
        assert_eq!(
            m.teams[0],
            TeamSummary {
                name: "Team A".to_string(),
                country: None,
                score: None,
            }
        );
        assert_eq!(
            m.teams[1],
            TeamSummary {
                name: "Team B".to_string(),
                country: Some("br".to_string()),
                score: Some("1".to_string()),
            }
        );
    }

    #[test]
    fn test_entry_needs_exactly_two_teams() {
        let team = r#"<div class="match-item-vs-team">
            <div class="match-item-vs-team-name">Team</div>
        </div>"#;
        let one = format!(r#"<a href="/4/x" class="wf-module-item match-item">{team}</a>"#);
        let three = format!(
            r#"<a href="/5/x" class="wf-module-item match-item">{team}{team}{team}</a>"#
        );
        let list = parse_matches(&format!("{one}{three}"), &ctx()).unwrap();
        assert_eq!(list.size, 0);
        assert_eq!(list.skipped, 2);
    }

    #[test]
    fn test_empty_page() {
        let list = parse_matches("<html><body></body></html>", &ctx()).unwrap();
        assert_eq!(list.size, 0);
        assert_eq!(list.skipped, 0);
        assert!(list.matches.is_empty());
    }

    #[tokio::test]
    #[ignore = "hits vlr.gg"]
    async fn test_get_matches_live() {
        let client = reqwest::Client::new();
        let list = get_matches(&client, "https://www.vlr.gg", Tz::UTC)
            .await
            .unwrap();
        assert_eq!(list.size, list.matches.len());
    }
}
