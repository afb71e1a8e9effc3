//! Simulator configuration.

use std::fmt;

use crate::{
    constants::simulate::{ACCESS_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, PROJECT_ENV, USER_ENV},
    Error,
};

/// Credentials of a simulator account.
#[derive(Clone, PartialEq, Eq)]
pub struct SimulatorAuth {
    /// Account name
    pub user: String,
    /// Project name
    pub project: String,
    /// Access key sent with every request
    pub access_key: String,
}

impl SimulatorAuth {
    /// Creates the credentials.
    pub fn new(
        user: impl Into<String>,
        project: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Self {
        Self { user: user.into(), project: project.into(), access_key: access_key.into() }
    }
}

impl fmt::Debug for SimulatorAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatorAuth")
            .field("user", &self.user)
            .field("project", &self.project)
            .field("access_key", &"<redacted>")
            .finish()
    }
}

/// Where and as whom simulations are submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Base URL of the API, without trailing slash
    pub base_url: String,
    /// Account credentials
    pub auth: SimulatorAuth,
}

impl SimulatorConfig {
    /// Creates a configuration for the public API.
    pub fn new(auth: SimulatorAuth) -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), auth }
    }

    /// Points the configuration at another deployment of the API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reads the configuration from `TENDERLY_USER`, `TENDERLY_PROJECT`, `TENDERLY_ACCESS_KEY`
    /// and the optional `TENDERLY_BASE_URL`.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::Config(format!("environment variable {key} is not set")))
        };

        let auth = SimulatorAuth::new(
            required(USER_ENV)?,
            required(PROJECT_ENV)?,
            required(ACCESS_KEY_ENV)?,
        );
        let config = Self::new(auth);
        Ok(match lookup(BASE_URL_ENV).filter(|url| !url.is_empty()) {
            Some(url) => config.with_base_url(url),
            None => config,
        })
    }

    /// The simulate endpoint of the configured project.
    pub fn simulate_url(&self) -> String {
        format!(
            "{}/api/v1/account/{}/project/{}/simulate",
            self.base_url, self.auth.user, self.auth.project
        )
    }
}
