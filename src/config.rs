//! Client configuration: the API base URL plus the local knobs (token file,
//! timeouts, password policy). Values come from command-line arguments with
//! environment fallbacks; configuration is public, do not store secrets here.

use crate::{
    error::{Error, Result},
    session::store::TOKEN_KEY,
    validation::PasswordPolicy,
};
use std::{path::PathBuf, time::Duration};
use url::Url;

/// Default request timeout applied to every API call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// How long a flash message stays visible before it is dismissed.
pub const DEFAULT_FLASH_TIMEOUT: Duration = Duration::from_secs(3);

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub token_path: PathBuf,
    pub request_timeout: Duration,
    pub flash_timeout: Duration,
    pub user_agent: String,
    pub password_policy: PasswordPolicy,
}

impl AppConfig {
    /// Builds a configuration for `api_base_url` with default settings.
    ///
    /// # Errors
    /// Returns an error if the URL is empty, cannot be parsed, or is not HTTP(S).
    pub fn new(api_base_url: &str) -> Result<Self> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            token_path: default_token_path(),
            request_timeout: DEFAULT_TIMEOUT,
            flash_timeout: DEFAULT_FLASH_TIMEOUT,
            user_agent: APP_USER_AGENT.to_string(),
            password_policy: PasswordPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_token_path(mut self, path: PathBuf) -> Self {
        self.token_path = path;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_flash_timeout(mut self, timeout: Duration) -> Self {
        self.flash_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_policy = policy;
        self
    }
}

/// Token file location: `<config dir>/schoolgate/auth_token`, or the working
/// directory when the platform has no config directory.
#[must_use]
pub fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(env!("CARGO_PKG_NAME")))
        .unwrap_or_default()
        .join(TOKEN_KEY)
}

/// Trims the value and rejects empty input.
pub(crate) fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_base_url(value: &str) -> Result<String> {
    let value = normalize_value(value).ok_or(Error::BaseUrl(url::ParseError::EmptyHost))?;
    let url = Url::parse(&value)?;

    match url.scheme() {
        "http" | "https" => Ok(value.trim_end_matches('/').to_string()),
        scheme => Err(Error::UnsupportedScheme(scheme.to_string())),
    }
}
