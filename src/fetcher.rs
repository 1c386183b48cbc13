//! Fetching pages from the remote log store.

use crate::model::LogPage;
use crate::query::LogQuery;
use std::fmt;
use std::time::Duration;

/// Failure of a single fetch. Never retried here; the caller decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, DNS or I/O failure before a status was received.
    Transport(String),
    /// The store answered with a non-2xx status.
    Status(u16),
    /// The body was not a valid page.
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "transport error: {}", msg),
            FetchError::Status(code) => write!(f, "HTTP {}", code),
            FetchError::Decode(msg) => write!(f, "invalid response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Source of log pages. Implementations are stateless per call.
pub trait LogFetcher: Send + Sync {
    fn fetch_page(&self, query: &LogQuery) -> Result<LogPage, FetchError>;
}

/// `GET {base_url}/logs` over HTTP.
///
/// No request timeout is configured: a store that never answers leaves the
/// request pending.
pub struct HttpLogFetcher {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpLogFetcher {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .user_agent(concat!("logdeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/logs", base_url.trim_end_matches('/')),
        })
    }
}

impl LogFetcher for HttpLogFetcher {
    fn fetch_page(&self, query: &LogQuery) -> Result<LogPage, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&query.to_pairs())
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<LogPage>()
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let fetcher = HttpLogFetcher::new("http://localhost:8000/").unwrap();
        assert_eq!(fetcher.endpoint, "http://localhost:8000/logs");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(FetchError::Status(503).to_string(), "HTTP 503");
        assert_eq!(
            FetchError::Transport("connection refused".into()).to_string(),
            "transport error: connection refused"
        );
    }
}
