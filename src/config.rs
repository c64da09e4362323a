use std::env;
use std::net::SocketAddr;

use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{Result, VlrError};

pub const DEFAULT_BASE_URL: &str = "https://www.vlr.gg";

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Config {
    /// Upstream site, without a trailing slash.
    pub base_url: String,
    /// Timezone the upstream renders match times in.
    pub timezone: Tz,
    pub bind_addr: SocketAddr,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timezone: Tz::UTC,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            request_timeout_secs: 30,
            user_agent: concat!("vlr-matches/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by `VLR_BASE_URL`, `VLR_TIMEZONE`, `BIND_ADDR`,
    /// `VLR_TIMEOUT_SECS` and `VLR_USER_AGENT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(base_url) = lookup("VLR_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(timezone) = lookup("VLR_TIMEZONE") {
            config.timezone = parse_value("VLR_TIMEZONE", timezone)?;
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = parse_value("BIND_ADDR", addr)?;
        }
        if let Some(timeout) = lookup("VLR_TIMEOUT_SECS") {
            config.request_timeout_secs = parse_value("VLR_TIMEOUT_SECS", timeout)?;
        }
        if let Some(user_agent) = lookup("VLR_USER_AGENT") {
            config.user_agent = user_agent;
        }

        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| VlrError::InvalidConfig { key, value })
}
