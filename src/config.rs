use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::detect::extractor::{CandidateExtractor, PatternError};
use crate::notify::message::DEFAULT_HEADER;

// =============================================================================
// Defaults
// =============================================================================

/// Timeout for each HTTP request in milliseconds (30 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// File name of the state record inside the data directory
pub const STATE_FILE_NAME: &str = "state.json";

/// User agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("patch-notifier/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Webhook URL is not set (use --webhook-url or WEBHOOK_URL)")]
    MissingWebhookUrl,

    #[error("Invalid {name}: {value}: {source}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("Timeout must be greater than zero")]
    ZeroTimeout,
}

/// Raw settings as collected from flags and environment, before validation
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub page_url: String,
    pub webhook_url: Option<String>,
    pub state_file: Option<PathBuf>,
    pub version_pattern: Option<String>,
    pub header: Option<String>,
    pub timeout_ms: Option<u64>,
    pub user_agent: Option<String>,
}

/// Validated settings for fetching the page and ranking its candidates
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub url: Url,
    pub extractor: CandidateExtractor,
    pub timeout: Duration,
    pub user_agent: String,
}

/// Validated configuration for one watch run
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub page: PageConfig,
    pub webhook_url: Url,
    pub state_file: PathBuf,
    pub header: String,
}

impl Settings {
    /// Validate the settings and fill in defaults.
    ///
    /// Fails on a missing or blank webhook before anything touches the network.
    pub fn resolve(self) -> Result<WatchConfig, ConfigError> {
        let webhook_url = self
            .webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingWebhookUrl)?;
        let webhook_url = parse_url("webhook URL", webhook_url)?;
        let page = self.resolve_page()?;

        Ok(WatchConfig {
            page,
            webhook_url,
            state_file: self.state_file_path(),
            header: self.header.unwrap_or_else(|| DEFAULT_HEADER.to_string()),
        })
    }

    /// Validate only what is needed to fetch the page and rank candidates
    pub fn resolve_page(&self) -> Result<PageConfig, ConfigError> {
        let url = parse_url("page URL", self.page_url.trim())?;

        let extractor = match self.version_pattern.as_deref() {
            Some(pattern) => CandidateExtractor::new(pattern)?,
            None => CandidateExtractor::default(),
        };

        let timeout_ms = self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
        if timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(PageConfig {
            url,
            extractor,
            timeout: Duration::from_millis(timeout_ms),
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }

    /// The configured state file, or the default one in the data directory
    pub fn state_file_path(&self) -> PathBuf {
        self.state_file.clone().unwrap_or_else(default_state_path)
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        source,
    })
}

/// Returns the path to the data directory for patch-notifier.
/// Uses $XDG_DATA_HOME/patch-notifier if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/patch-notifier,
/// or ./patch-notifier if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the default path of the state record.
pub fn default_state_path() -> PathBuf {
    data_dir().join(STATE_FILE_NAME)
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("patch-notifier")
}
