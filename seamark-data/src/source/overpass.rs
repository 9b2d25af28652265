//! Remote [`RecordSource`] backed by the Overpass API.
//!
//! A single POST request asks the interpreter for every node carrying a
//! `seamark:type` tag around a reference point, leaving out harbours and
//! rescue stations. There is no retry: a failed request surfaces as a
//! [`SourceError`] straight away.
//!
//! # Runtime behaviour
//!
//! [`RecordSource`] is synchronous. The source owns a current-thread Tokio
//! runtime and blocks on it, unless it is called from inside a multi-threaded
//! runtime, in which case it uses that runtime's handle through
//! [`tokio::task::block_in_place`].

use std::time::Duration;

use log::debug;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use seamark_core::RawRecord;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::{AreaQuery, RecordSource, records_from_array};
use crate::error::SourceError;

/// Public Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Default user agent for Overpass requests.
pub const DEFAULT_USER_AGENT: &str = "seamark-sync/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Failure to set up an [`OverpassSource`].
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The reqwest client rejected the configuration.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The owned current-thread runtime could not start.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Configuration for [`OverpassSource`].
#[derive(Debug, Clone)]
pub struct OverpassSourceConfig {
    /// Interpreter URL.
    pub endpoint: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OverpassSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OVERPASS_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OverpassSourceConfig {
    /// Create a configuration for the given interpreter URL.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Overpass interpreter response body.
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Value,
}

/// Fetches seamark nodes from an Overpass interpreter.
#[derive(Debug)]
pub struct OverpassSource {
    client: Client,
    config: OverpassSourceConfig,
    runtime: Runtime,
}

impl OverpassSource {
    /// Create a source for the public interpreter with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(OverpassSourceConfig::default())
    }

    /// Create a source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: OverpassSourceConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &OverpassSourceConfig {
        &self.config
    }

    /// Build the Overpass QL body for `query`.
    fn build_query(query: &AreaQuery) -> String {
        format!(
            "[out:json];node['seamark:type']['seamark:type'!='harbour']['seamark:type'!='rescue_station'](around:{},{},{});out;",
            query.radius_m,
            query.center.lat(),
            query.center.lon()
        )
    }

    async fn fetch_async(&self, query: &AreaQuery) -> Result<Vec<RawRecord>, SourceError> {
        let url = self.config.endpoint.as_str();
        let body = Self::build_query(query);
        debug!("POST {url}: {body}");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        let text = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        Self::parse_response(&text, url)
    }

    /// Decode an interpreter response into raw node records.
    fn parse_response(text: &str, url: &str) -> Result<Vec<RawRecord>, SourceError> {
        let response: OverpassResponse =
            serde_json::from_str(text).map_err(|source| SourceError::Json {
                origin: url.to_owned(),
                source,
            })?;
        records_from_array(response.elements, url)
    }

    /// Convert a reqwest error to a `SourceError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> SourceError {
        if error.is_timeout() {
            return SourceError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return SourceError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        SourceError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl RecordSource for OverpassSource {
    fn fetch(&self, query: &AreaQuery) -> Result<Vec<RawRecord>, SourceError> {
        // block_in_place requires a multi-threaded runtime; for current_thread
        // runtimes we fall back to our own stored runtime.
        let future = self.fetch_async(query);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
