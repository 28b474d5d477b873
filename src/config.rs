//! Runtime configuration and imgflip credentials
//!
//! `Config` is derived once from the command line and handed to the catalog
//! store and API clients. Credentials are only looked up on the captioning path.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::cli::Cli;

/// Default location of the catalog cache, relative to the working directory
pub const DEFAULT_CACHE_FILE: &str = "memes.json";

/// Base URL of the imgflip API
pub const DEFAULT_API_BASE: &str = "https://api.imgflip.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connect timeout for the shared HTTP client
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable holding the imgflip username
pub const USERNAME_VAR: &str = "IMGFLIP_USERNAME";

/// Environment variable holding the imgflip password
pub const PASSWORD_VAR: &str = "IMGFLIP_PASSWORD";

/// Settings shared by the catalog store and the API clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the cached template list
    pub cache_file: PathBuf,
    /// Base URL of the imgflip API, without a trailing slash
    pub api_base: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Builds the configuration from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            cache_file: cli.cache_file.clone(),
            api_base: cli.api_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(cli.timeout),
        }
    }

    /// Builds the HTTP client used for every imgflip request.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(concat!("memegen/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(self.timeout)
            .build()
    }
}

/// A required credential was not provided
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("Missing environment variable: {0}\nSign up at https://imgflip.com/signup")]
    Missing(&'static str),
}

/// imgflip account used to caption images
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Reads `IMGFLIP_USERNAME` and `IMGFLIP_PASSWORD` from the process environment.
    pub fn from_env() -> Result<Self, CredentialsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads credentials through `lookup`. Empty values count as missing and
    /// the username is checked first.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CredentialsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(CredentialsError::Missing(key))
        };

        let username = require(USERNAME_VAR)?;
        let password = require(PASSWORD_VAR)?;

        Ok(Self { username, password })
    }
}
