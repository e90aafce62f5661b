//! Client configuration.
//!
//! Resolved from environment variables with build-profile defaults:
//!
//! | Variable | Default |
//! |---|---|
//! | `QUESTBOARD_ENV` | `development` in debug builds, `production` in release builds |
//! | `QUESTBOARD_API_URL` | local worker in development, hosted backend in production |
//! | `QUESTBOARD_TIMEOUT_SECS` | `15` |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

use crate::error::QuestError;

/// Backend used when running a release build without `QUESTBOARD_API_URL`
pub const PRODUCTION_API_URL: &str = "https://be-agency-order-courage.williamjonescodes.workers.dev";

/// Local backend (wrangler dev) used by debug builds
pub const DEVELOPMENT_API_URL: &str = "http://127.0.0.1:8787";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Deployment environment the client was built or launched for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Environment implied by the build profile
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }

    /// `QUESTBOARD_ENV` if set and valid, otherwise the build profile
    pub fn current() -> Result<Self, QuestError> {
        match var("QUESTBOARD_ENV") {
            Some(raw) => raw.parse(),
            None => Ok(Self::from_build()),
        }
    }

    pub fn default_api_url(&self) -> &'static str {
        match self {
            Environment::Development => DEVELOPMENT_API_URL,
            Environment::Production => PRODUCTION_API_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = QuestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(QuestError::Config(format!(
                "unknown environment '{}' (expected development or production)",
                other
            ))),
        }
    }
}

/// Everything the HTTP client and the identity mirror need
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub environment: Environment,
    /// Base URL without trailing slash, e.g. `http://127.0.0.1:8787`
    pub base_url: String,
    pub timeout: Duration,
    /// Directory holding the identity database
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, QuestError> {
        let environment = Environment::current()?;

        let base_url = match var("QUESTBOARD_API_URL") {
            Some(url) => url,
            None => environment.default_api_url().to_string(),
        };

        let timeout = match var("QUESTBOARD_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse().map_err(|e| {
                QuestError::Config(format!("QUESTBOARD_TIMEOUT_SECS='{}': {}", raw, e))
            })?),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Self::new(environment, &base_url, timeout, default_data_dir())
    }

    /// Build a validated configuration.
    pub fn new(
        environment: Environment,
        base_url: &str,
        timeout: Duration,
        data_dir: PathBuf,
    ) -> Result<Self, QuestError> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self {
            environment,
            base_url,
            timeout,
            data_dir,
        })
    }

    /// Same config pointed at another backend
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, QuestError> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }

    /// Location of the identity mirror database
    pub fn identity_path(&self) -> PathBuf {
        self.data_dir.join("identity.redb")
    }

    /// Directory for JSONL log files
    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

/// Default data directory (`<platform data dir>/questboard`)
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("questboard")
}

fn normalize_base_url(raw: &str) -> Result<String, QuestError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| QuestError::Config(format!("invalid API URL '{}': {}", raw, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        scheme => Err(QuestError::Config(format!(
            "API URL must be http or https, got '{}'",
            scheme
        ))),
    }
}

fn var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => {
            debug!("{key} not set, using default");
            None
        }
    }
}
