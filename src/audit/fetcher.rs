//! HTTP page fetcher
//!
//! This module handles the single HTTP request made for each audited URL:
//! - Building the HTTP client with the configured user agent and timeout
//! - Issuing one GET per URL, without retries
//! - Reading the body only for `200 OK` responses
//! - Collapsing every transport failure into one outcome

use crate::config::{FetcherConfig, UserAgentConfig};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The server answered
    Page {
        /// HTTP status code of the final response
        status: u16,
        /// Response body, present only when the status is exactly 200
        body: Option<String>,
    },

    /// DNS, connect, TLS, timeout, malformed response or body read failure
    Failed,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `fetcher` - Timeout settings
/// * `user_agent` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use seo_audit::config::{FetcherConfig, UserAgentConfig};
/// use seo_audit::audit::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    fetcher: &FetcherConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(fetcher.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages for the batch runner
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Creates a fetcher around an already configured client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a fetcher from configuration
    pub fn from_config(
        fetcher: &FetcherConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(fetcher, user_agent)?))
    }

    /// Fetches a URL once
    ///
    /// # Outcome Mapping
    ///
    /// | Condition | Outcome |
    /// |-----------|---------|
    /// | HTTP 200, body read | `Page { status: 200, body: Some(..) }` |
    /// | Any other HTTP status | `Page { status, body: None }` |
    /// | Request error of any kind | `Failed` |
    /// | HTTP 200, body read error | `Failed` |
    ///
    /// The URL is handed to the client as-is; a malformed URL is a request
    /// error like any other.
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Request to {} failed: {}", url, describe_error(&e));
                return FetchOutcome::Failed;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            return FetchOutcome::Page {
                status: status.as_u16(),
                body: None,
            };
        }

        match response.text().await {
            Ok(body) => FetchOutcome::Page {
                status: status.as_u16(),
                body: Some(body),
            },
            Err(e) => {
                tracing::debug!("Reading body of {} failed: {}", url, describe_error(&e));
                FetchOutcome::Failed
            }
        }
    }
}

/// Short description of a request error, for debug logs only
fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timeout".to_string()
    } else if e.is_connect() {
        format!("connection failed ({})", e)
    } else if e.is_builder() {
        format!("invalid request ({})", e)
    } else {
        e.to_string()
    }
}
