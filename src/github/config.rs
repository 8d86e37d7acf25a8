//! Github configuration
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::{GITHUB_ACCEPT_HEADER, GITHUB_API_URL, NETWORK_TIMEOUT_SECS};
use crate::errors::GitScoutError;

/// Environment variable overriding `github.api_url`
pub(crate) const API_URL_ENV: &str = "GIT_SCOUT_API_URL";

/// `[github]` section of the config file
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct GithubConfig {
    /// Base URL of the API
    pub api_url: Option<String>,

    /// Value of the `Accept` header
    pub accept: Option<String>,

    /// Connect and read timeout, in seconds
    pub timeout_secs: Option<u64>,

    /// Probe the API host before searching
    pub check_connectivity: Option<bool>,
}

/// Resolved github settings, defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubSettings {
    /// Base URL of the API, always ending with a slash
    pub api_url: Url,

    /// Value of the `Accept` header
    pub accept: String,

    /// Connect and read timeout
    pub timeout: Duration,

    /// Probe the API host before searching
    pub check_connectivity: bool,
}

impl GithubConfig {
    /// Apply defaults and the environment override.
    /// # Errors
    /// Error if the API URL can't be parsed
    pub fn settings(&self) -> Result<GithubSettings, GitScoutError> {
        let api_url = match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self
                .api_url
                .clone()
                .unwrap_or_else(|| GITHUB_API_URL.to_string()),
        };
        GithubSettings::new(&api_url)
            .map(|settings| GithubSettings {
                accept: self
                    .accept
                    .clone()
                    .unwrap_or_else(|| GITHUB_ACCEPT_HEADER.to_string()),
                timeout: Duration::from_secs(self.timeout_secs.unwrap_or(NETWORK_TIMEOUT_SECS)),
                check_connectivity: self.check_connectivity.unwrap_or(true),
                ..settings
            })
    }
}

impl GithubSettings {
    /// Default settings against the given base URL.
    /// # Errors
    /// Error if `api_url` is not a valid URL
    pub fn new(api_url: &str) -> Result<Self, GitScoutError> {
        let mut api_url = Url::parse(api_url)?;
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }
        Ok(Self {
            api_url,
            accept: GITHUB_ACCEPT_HEADER.to_string(),
            timeout: Duration::from_secs(NETWORK_TIMEOUT_SECS),
            check_connectivity: true,
        })
    }
}
