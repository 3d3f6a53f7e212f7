//! HTTP client for the games export endpoint.

use elokline_types::KlineError;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use thiserror::Error;

use crate::url::{DEFAULT_BASE_URL, GamesQuery, games_url};

/// Media type of the newline-delimited JSON export.
pub const NDJSON_MEDIA_TYPE: &str = "application/x-ndjson";

/// Configuration for the games client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API host, e.g. `https://lichess.org`.
    pub base_url: String,
    /// Time allowed until response headers arrive. The body itself may stream
    /// for much longer.
    pub timeout: Duration,
    /// Maximum retry attempts for failed requests.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
    /// Personal API token, sent as a bearer token.
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 5,
            base_delay_ms: 1_000, // the API asks clients to back off on 429
            max_delay_ms: 60_000,
            user_agent: format!("elokline/{}", env!("CARGO_PKG_VERSION")),
            token: None,
        }
    }
}

/// Errors that can occur while fetching games.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No response headers within the configured timeout.
    #[error("Request timed out after {0} attempts")]
    Timeout(u32),

    /// Server returned an error status.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// The requested user does not exist.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// The configured base URL cannot be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A line of the response body is not a valid game record.
    #[error("Invalid record on line {line}: {source}")]
    Decode {
        /// 1-based line number within the response body.
        line: usize,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

impl From<FetchError> for KlineError {
    fn from(error: FetchError) -> Self {
        let message = error.to_string();
        match error {
            FetchError::Decode { .. } => Self::Decode(message),
            _ => Self::Http(message),
        }
    }
}

/// HTTP client with connection pooling and retry logic.
#[derive(Debug, Clone)]
pub struct GamesClient {
    client: Client,
    config: ClientConfig,
}

impl GamesClient {
    /// Creates a new games client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends the export request and returns the response once its headers
    /// arrived with a success status. The body is left unread.
    ///
    /// Only establishing the response is retried; nothing is retried once the
    /// body starts streaming.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist, the server keeps failing
    /// after all retries, or the request cannot be sent.
    pub async fn open(&self, query: &GamesQuery) -> Result<Response, FetchError> {
        let url = games_url(&self.config.base_url, &query.username)?;
        let mut attempts = 0;

        loop {
            let mut request = self
                .client
                .get(url.clone())
                .query(&query.params())
                .header(ACCEPT, HeaderValue::from_static(NDJSON_MEDIA_TYPE));
            if let Some(token) = &self.config.token {
                request = request.bearer_auth(token);
            }

            tracing::debug!(url = %url, attempt = attempts, "requesting games export");

            match tokio::time::timeout(self.config.timeout, request.send()).await {
                Err(_elapsed) => {
                    if attempts < self.config.max_retries {
                        attempts += 1;
                        self.backoff(attempts).await;
                        continue;
                    }
                    return Err(FetchError::Timeout(attempts + 1));
                }
                Ok(Ok(response)) => {
                    let status = response.status();
                    if status == StatusCode::NOT_FOUND {
                        return Err(FetchError::UserNotFound(query.username.clone()));
                    }

                    // Retry on server errors (5xx) and rate limiting (429)
                    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            tracing::warn!(%status, attempt = attempts, "games export failed, retrying");
                            self.backoff(attempts).await;
                            continue;
                        }
                        return Err(FetchError::ServerError {
                            status: status.as_u16(),
                        });
                    }

                    return Ok(response.error_for_status()?);
                }
                Ok(Err(e)) if is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    tracing::warn!(error = %e, attempt = attempts, "games export request failed, retrying");
                    self.backoff(attempts).await;
                }
                Ok(Err(e)) => return Err(e.into()),
            }
        }
    }

    async fn backoff(&self, attempt: u32) {
        tokio::time::sleep(self.calculate_backoff_delay(attempt)).await;
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));

        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter within ±25%
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            let offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            offset as i64 - jitter_range as i64
        } else {
            0
        };

        let final_delay = (capped_delay as i64 + jitter).max(100) as u64;
        Duration::from_millis(final_delay)
    }
}

/// Determines if a transport error is worth retrying.
fn is_retryable_error(error: &reqwest::Error) -> bool {
    if error.is_builder() {
        return false;
    }
    error.is_timeout() || error.is_connect() || error.is_request()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://lichess.org");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.token.is_none());
        assert!(config.user_agent.starts_with("elokline/"));
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = GamesClient::with_defaults();
        assert!(client.is_ok());
    }

    #[test]
    fn test_backoff_delay_calculation() {
        let client = GamesClient::with_defaults().unwrap();

        // First retry: base_delay * 2 = 2000ms (plus jitter)
        let delay1 = client.calculate_backoff_delay(1);
        assert!(delay1.as_millis() >= 1500 && delay1.as_millis() <= 2500);

        // Capped at max_delay
        let delay_high = client.calculate_backoff_delay(20);
        assert!(delay_high.as_millis() <= 75_000);
        assert!(delay_high.as_millis() >= 45_000);
    }

    #[tokio::test]
    async fn test_open_rejects_invalid_base_url() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        let client = GamesClient::new(config).unwrap();
        let query = GamesQuery::new("alice", elokline_types::Speed::Blitz);

        let result = client.open(&query).await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_decode_error_converts_to_kline_decode() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: KlineError = FetchError::Decode { line: 3, source }.into();
        assert!(matches!(error, KlineError::Decode(msg) if msg.contains("line 3")));
    }
}
