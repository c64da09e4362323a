use std::time::Duration;

use chrono_tz::Tz;
use tracing::instrument;

use crate::config::{Config, DEFAULT_BASE_URL};
use crate::error::{Result, VlrError};
use crate::model::*;
use crate::scraper;

/// The main entry point for reading matches from vlr.gg.
///
/// `VlrClient` wraps a [`reqwest::Client`] together with the upstream base
/// URL and the timezone the upstream renders match times in.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> vlr_matches::Result<()> {
/// use vlr_matches::VlrClient;
///
/// let client = VlrClient::new();
/// let list = client.get_matches().await?;
/// println!("Found {} matches", list.size);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VlrClient {
    http: reqwest::Client,
    base_url: String,
    timezone: Tz,
}

impl VlrClient {
    /// Create a new client against vlr.gg, reading times as UTC.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            http: client,
            base_url: DEFAULT_BASE_URL.to_string(),
            timezone: Tz::UTC,
        }
    }

    /// Build the HTTP client and upstream settings from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| VlrError::Http {
                url: config.base_url.clone(),
                source: e,
            })?;
        Ok(Self::with_client(http)
            .base_url(&config.base_url)
            .timezone(config.timezone))
    }

    /// Point the client at another upstream, e.g. a mirror or a test server.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Timezone used to interpret the local times on the matches page.
    pub fn timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Fetch every match on the matches index page.
    ///
    /// Entries that cannot be extracted are skipped and counted in
    /// [`MatchList::skipped`].
    #[instrument(skip(self))]
    pub async fn get_matches(&self) -> Result<MatchList> {
        scraper::matches::get_matches(&self.http, &self.base_url, self.timezone).await
    }

    /// Fetch the header details of a specific match by ID.
    #[instrument(skip(self))]
    pub async fn get_match(&self, match_id: &str) -> Result<MatchDetail> {
        scraper::match_detail::get_match(&self.http, &self.base_url, match_id).await
    }
}

impl Default for VlrClient {
    fn default() -> Self {
        Self::new()
    }
}
