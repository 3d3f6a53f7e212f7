//! Games export URL and query construction.

use chrono::{DateTime, Utc};
use elokline_types::Speed;
use reqwest::Url;

use crate::FetchError;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://lichess.org";

/// Default upper bound on the number of games requested.
pub const DEFAULT_MAX_GAMES: usize = 100_000;

/// Builds the export URL for a user's games.
///
/// URL format: `{base_url}/api/games/user/{username}`
///
/// The username is appended as an escaped path segment.
///
/// # Errors
///
/// Returns an error if `base_url` is not a valid base URL.
///
/// # Example
///
/// ```
/// use elokline_fetch::url::{DEFAULT_BASE_URL, games_url};
///
/// let url = games_url(DEFAULT_BASE_URL, "DrNykterstein").unwrap();
/// assert_eq!(url.as_str(), "https://lichess.org/api/games/user/DrNykterstein");
/// ```
pub fn games_url(base_url: &str, username: &str) -> Result<Url, FetchError> {
    let mut url =
        Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| FetchError::InvalidUrl(format!("{base_url}: cannot be a base")))?
        .pop_if_empty()
        .extend(["api", "games", "user", username]);
    Ok(url)
}

/// Parameters of a games export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamesQuery {
    /// Player whose games are requested.
    pub username: String,
    /// Speed category to restrict the export to.
    pub speed: Speed,
    /// Maximum number of games to return.
    pub max: usize,
    /// Only return games created at or after this instant.
    pub since: Option<DateTime<Utc>>,
}

impl GamesQuery {
    /// Creates a query for all rated games of one speed.
    #[must_use]
    pub fn new(username: impl Into<String>, speed: Speed) -> Self {
        Self {
            username: username.into(),
            speed,
            max: DEFAULT_MAX_GAMES,
            since: None,
        }
    }

    /// Sets the maximum number of games.
    #[must_use]
    pub const fn with_max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }

    /// Sets the earliest creation time to export.
    #[must_use]
    pub const fn with_since(mut self, since: Option<DateTime<Utc>>) -> Self {
        self.since = since;
        self
    }

    /// Returns the query string parameters: rated games only, one perf type,
    /// no move text.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("rated", "true".to_string()),
            ("perfType", self.speed.as_str().to_string()),
            ("max", self.max.to_string()),
            ("moves", "false".to_string()),
        ];
        if let Some(since) = self.since {
            params.push(("since", since.timestamp_millis().to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_games_url() {
        let url = games_url("https://lichess.org", "alice").unwrap();
        assert_eq!(url.as_str(), "https://lichess.org/api/games/user/alice");
    }

    #[test]
    fn test_games_url_trailing_slash_and_escaping() {
        let url = games_url("http://localhost:8080/", "a b").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/games/user/a%20b");
    }

    #[test]
    fn test_games_url_invalid_base() {
        assert!(matches!(
            games_url("not a url", "alice"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_query_params() {
        let query = GamesQuery::new("alice", Speed::Rapid).with_max(50);
        let params = query.params();

        assert!(params.contains(&("rated", "true".to_string())));
        assert!(params.contains(&("perfType", "rapid".to_string())));
        assert!(params.contains(&("max", "50".to_string())));
        assert!(params.contains(&("moves", "false".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "since"));
    }

    #[test]
    fn test_query_since() {
        let since = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let query = GamesQuery::new("alice", Speed::Blitz).with_since(Some(since));

        assert_eq!(query.max, DEFAULT_MAX_GAMES);
        assert!(
            query
                .params()
                .contains(&("since", "1704153600000".to_string()))
        );
    }
}
