// Suite configuration
//
// Endpoints, browser choice and timeouts for every scenario. Defaults point
// at the public endpoints; environment variables override them so the same
// tests run against the local replica server or a different browser.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Teams feed used by the API scenarios
pub const TEAMS_URL: &str = "https://qa-assignment.dev1.whalebone.io/api/teams";

/// UI Testing Playground home page
pub const PLAYGROUND_URL: &str = "http://uitestingplayground.com/";

/// Environment variable overriding [`SuiteConfig::teams_url`]
pub const ENV_TEAMS_URL: &str = "TEAM_E2E_TEAMS_URL";
/// Environment variable overriding [`SuiteConfig::playground_url`]
pub const ENV_PLAYGROUND_URL: &str = "TEAM_E2E_PLAYGROUND_URL";
/// Environment variable overriding [`SuiteConfig::browser`]
pub const ENV_BROWSER: &str = "TEAM_E2E_BROWSER";
/// Environment variable overriding [`SuiteConfig::headless`]
pub const ENV_HEADLESS: &str = "TEAM_E2E_HEADLESS";

/// Browser engine to launch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(BrowserKind::Chromium),
            "firefox" => Ok(BrowserKind::Firefox),
            "webkit" => Ok(BrowserKind::Webkit),
            other => Err(Error::Config(format!(
                "unknown browser '{}' (expected chromium, firefox or webkit)",
                other
            ))),
        }
    }
}

/// Configuration shared by every scenario
///
/// All fields are optional when deserializing; missing ones take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuiteConfig {
    /// JSON endpoint listing the teams
    pub teams_url: String,

    /// Playground home page
    pub playground_url: String,

    /// Browser engine (default: chromium)
    pub browser: BrowserKind,

    /// Run the browser without a window (default: true)
    pub headless: bool,

    /// Bound for page objects' `await_loaded` in milliseconds (default: 10s)
    pub load_timeout_ms: u64,

    /// Soft bound for progress bar polling in milliseconds (default: 60s)
    pub progress_timeout_ms: u64,

    /// Progress bar polling cadence in milliseconds (default: 100ms)
    pub poll_interval_ms: u64,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            teams_url: TEAMS_URL.to_string(),
            playground_url: PLAYGROUND_URL.to_string(),
            browser: BrowserKind::default(),
            headless: true,
            load_timeout_ms: 10_000,
            progress_timeout_ms: 60_000,
            poll_interval_ms: 100,
        }
    }
}

impl SuiteConfig {
    /// Creates a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the `TEAM_E2E_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `TEAM_E2E_*` keys
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_TEAMS_URL) {
            config.teams_url = validate_url(ENV_TEAMS_URL, url)?;
        }
        if let Some(url) = lookup(ENV_PLAYGROUND_URL) {
            config.playground_url = validate_url(ENV_PLAYGROUND_URL, url)?;
        }
        if let Some(browser) = lookup(ENV_BROWSER) {
            config.browser = browser.parse()?;
        }
        if let Some(headless) = lookup(ENV_HEADLESS) {
            config.headless = parse_flag(ENV_HEADLESS, &headless)?;
        }

        tracing::debug!("Suite configuration: {:?}", config);
        Ok(config)
    }

    /// Parses a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("invalid configuration: {}", e)))?;
        validate_url("teamsUrl", config.teams_url.clone())?;
        validate_url("playgroundUrl", config.playground_url.clone())?;
        Ok(config)
    }

    /// Set the teams endpoint
    pub fn teams_url(mut self, url: impl Into<String>) -> Self {
        self.teams_url = url.into();
        self
    }

    /// Set the playground home page
    pub fn playground_url(mut self, url: impl Into<String>) -> Self {
        self.playground_url = url.into();
        self
    }

    /// Set the browser engine
    pub fn browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    /// Run headless or with a window
    pub fn headless(mut self, enabled: bool) -> Self {
        self.headless = enabled;
        self
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    pub fn progress_timeout(&self) -> Duration {
        Duration::from_millis(self.progress_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Launch options for the configured browser
    pub fn launch_options(&self) -> playwright_rs::LaunchOptions {
        playwright_rs::LaunchOptions::new().headless(self.headless)
    }
}

fn validate_url(key: &str, value: String) -> Result<String> {
    url::Url::parse(&value)
        .map_err(|e| Error::Config(format!("{} is not a valid URL ('{}'): {}", key, value, e)))?;
    Ok(value)
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}
