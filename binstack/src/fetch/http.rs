//! HTTP client abstraction for testability.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

/// Default timeout for artifact downloads (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Failure of a single GET request.
///
/// A missing artifact (HTTP 404) is distinguished from other HTTP and
/// transport failures because the two are reported differently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// The server answered 404.
    #[error("not found")]
    NotFound,

    /// The server answered with a non-success status other than 404.
    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },

    /// The request failed before or while reading the response.
    #[error("{0}")]
    Transport(String),
}

/// Trait for HTTP GET operations.
///
/// This abstraction allows dependency injection of mock clients in tests.
pub trait HttpClient: Send + Sync {
    /// Perform a GET request, returning the full response body.
    fn get(&self, url: &str) -> Result<Vec<u8>, HttpError>;
}

/// Real HTTP client implementation using blocking reqwest.
#[derive(Debug)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Create a client with the default timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(HttpError::NotFound);
        }
        if !status.is_success() {
            return Err(HttpError::Status {
                code: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| HttpError::Transport(format!("failed to read response: {}", e)))
    }
}
