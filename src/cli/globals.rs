use crate::config::AppConfig;
use std::{path::PathBuf, time::Duration};

/// Arguments shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub token_file: Option<PathBuf>,
    pub timeout: Duration,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            token_file: None,
            timeout: crate::config::DEFAULT_TIMEOUT,
        }
    }

    /// # Errors
    /// Returns an error if the API URL is not a valid HTTP(S) URL.
    pub fn config(&self) -> crate::Result<AppConfig> {
        let config = AppConfig::new(&self.api_url)?.with_request_timeout(self.timeout);
        Ok(match &self.token_file {
            Some(path) => config.with_token_path(path.clone()),
            None => config,
        })
    }
}
