//! Configuration options for the MediNear client

use std::path::PathBuf;
use std::time::Duration;

use medinear_geolocation::PositionOptions;

use crate::browser::SearchRadius;
use crate::error::{Error, Result};

/// Backend used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Configuration options for the MediNear client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the backend API, including the `/api` prefix
    pub api_url: String,

    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Options for every location request
    pub geolocation: PositionOptions,

    /// Radius the resource browsers start with
    pub default_radius: SearchRadius,

    /// Whether the session is written to `session_file`
    pub persist_session: bool,

    /// Where the persisted session lives
    pub session_file: Option<PathBuf>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Some(Duration::from_secs(30)),
            geolocation: PositionOptions::default(),
            default_radius: SearchRadius::default(),
            persist_session: false,
            session_file: None,
        }
    }
}

impl ClientOptions {
    /// Load options from the environment (and a `.env` file, when present)
    ///
    /// Reads `MEDINEAR_API_URL`, `MEDINEAR_SESSION_FILE` and
    /// `MEDINEAR_REQUEST_TIMEOUT_SECS`; anything unset keeps its default.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let mut options = Self::default();

        if let Ok(url) = std::env::var("MEDINEAR_API_URL") {
            url::Url::parse(&url)?;
            options.api_url = url;
        }

        if let Ok(path) = std::env::var("MEDINEAR_SESSION_FILE") {
            options = options.with_session_file(path);
        }

        if let Ok(secs) = std::env::var("MEDINEAR_REQUEST_TIMEOUT_SECS") {
            let secs = secs.parse::<u64>().map_err(|_| {
                Error::config(format!("MEDINEAR_REQUEST_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            options.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(options)
    }

    /// Set the API base URL
    pub fn with_api_url(mut self, value: &str) -> Self {
        self.api_url = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the location request options
    pub fn with_geolocation(mut self, value: PositionOptions) -> Self {
        self.geolocation = value;
        self
    }

    /// Set the starting search radius
    pub fn with_default_radius(mut self, value: SearchRadius) -> Self {
        self.default_radius = value;
        self
    }

    /// Persist the session to the given file
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self.persist_session = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ClientOptions::default();
        assert_eq!(options.api_url, "http://localhost:5000/api");
        assert_eq!(options.geolocation.timeout, Duration::from_secs(10));
        assert!(options.geolocation.enable_high_accuracy);
        assert_eq!(options.default_radius.km(), 10);
        assert!(!options.persist_session);
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let options = ClientOptions::default()
            .with_api_url("https://api.example.com/api/")
            .with_session_file("/tmp/medinear.json");
        assert_eq!(options.api_url, "https://api.example.com/api");
        assert!(options.persist_session);
    }
}
