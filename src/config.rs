// Runtime configuration.
// Resolves the data home and API token once, then gets passed into every operation.

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::{Result, WatchtowerError};
use crate::github::client::GITHUB_API_BASE;

/// Environment variable holding the `user:token` pair.
pub const TOKEN_ENV: &str = "GITHUB_API";

/// Environment variable overriding the data home.
pub const DATA_HOME_ENV: &str = "WATCHTOWER_DATA";

/// Directory name under the user's home used when no data home is given.
const DEFAULT_DATA_DIR: &str = "watchtower_data";

/// Explicit settings shared by fetch and cache operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root directory of all cached project data.
    pub data_home: PathBuf,
    /// Base URL of the GitHub REST API.
    pub api_base: String,
    /// Fallback `user:token` pair used when no explicit auth is supplied.
    pub token: Option<String>,
}

impl Config {
    /// Config rooted at `data_home`, talking to the public API, without a token.
    pub fn new(data_home: impl Into<PathBuf>) -> Self {
        Self {
            data_home: data_home.into(),
            api_base: GITHUB_API_BASE.to_string(),
            token: None,
        }
    }

    /// Build a config from `WATCHTOWER_DATA` and `GITHUB_API`.
    ///
    /// An explicit `data_home` takes precedence over `WATCHTOWER_DATA`. The
    /// home directory is only consulted when neither is set.
    pub fn from_env(data_home: Option<PathBuf>) -> Result<Self> {
        Self::from_vars(
            data_home,
            std::env::var(DATA_HOME_ENV).ok(),
            std::env::var(TOKEN_ENV).ok(),
            default_data_home,
        )
    }

    fn from_vars(
        explicit: Option<PathBuf>,
        env_data_home: Option<String>,
        token: Option<String>,
        fallback: impl FnOnce() -> Result<PathBuf>,
    ) -> Result<Self> {
        let data_home = match (explicit, env_data_home.filter(|s| !s.is_empty())) {
            (Some(dir), _) => dir,
            (None, Some(dir)) => PathBuf::from(dir),
            (None, None) => fallback()?,
        };
        let mut config = Self::new(data_home);
        config.token = token.filter(|s| !s.is_empty());
        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// `~/watchtower_data`.
pub fn default_data_home() -> Result<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(DEFAULT_DATA_DIR))
        .ok_or(WatchtowerError::MissingHome)
}
