//! Connection configuration for the Jira client.

use crate::error::{Error, Result};
use std::time::Duration;

/// Default REST API path prefix (API v3).
pub const DEFAULT_API_PATH: &str = "/rest/api/3";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a Jira Cloud instance.
///
/// Built once at startup and owned by the [`crate::JiraClient`] for its
/// entire lifetime; never mutated after construction.
#[derive(Debug, Clone)]
pub struct JiraConfig {
    /// Base URL of the Jira instance (e.g. `https://your-domain.atlassian.net`).
    pub base_url: String,

    /// Account email used for basic authentication.
    pub email: String,

    /// API token generated in the Atlassian account settings.
    pub api_token: String,

    /// REST API path prefix appended to the base URL.
    pub api_path: String,

    /// Timeout applied to every request.
    pub request_timeout: Duration,
}

impl JiraConfig {
    /// Create a configuration with the default API path and timeout.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            email: email.into(),
            api_token: api_token.into(),
            api_path: DEFAULT_API_PATH.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Read the configuration from `JIRA_URL`, `JIRA_EMAIL` and `JIRA_PAT`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first variable that is missing
    /// or empty.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            require_env("JIRA_URL")?,
            require_env("JIRA_EMAIL")?,
            require_env("JIRA_PAT")?,
        ))
    }

    /// Full prefix for REST resources: base URL plus API path.
    #[must_use]
    pub fn api_root(&self) -> String {
        format!("{}{}", self.base_url, self.api_path)
    }
}

fn require_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_defaults() {
        let config = JiraConfig::new("https://demo.atlassian.net", "me@example.com", "token");
        assert_eq!(config.api_path, "/rest/api/3");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn api_root_joins_base_and_path() {
        let config = JiraConfig::new("https://demo.atlassian.net", "me@example.com", "token");
        assert_eq!(config.api_root(), "https://demo.atlassian.net/rest/api/3");
    }
}
