//! Error types for elokline.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for elokline operations.
pub type Result<T> = std::result::Result<T, KlineError>;

/// Errors that can occur while fetching, aggregating and writing rating data.
#[derive(Error, Debug)]
pub enum KlineError {
    /// Neither side of a game belongs to the queried player.
    #[error("Game {game_id} has no side played by '{username}'")]
    PlayerNotFound {
        /// The offending game.
        game_id: String,
        /// The username the games were requested for.
        username: String,
    },

    /// Both sides of a game match the queried player.
    #[error("Game {game_id} has both sides matching '{username}'")]
    AmbiguousPlayer {
        /// The offending game.
        game_id: String,
        /// The username the games were requested for.
        username: String,
    },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A line of the game stream could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid day range.
    #[error(transparent)]
    DayRange(#[from] DayRangeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output format error.
    #[error("Format error: {0}")]
    Format(String),

    /// Bar cache error.
    #[error("Cache error: {0}")]
    Cache(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KlineError {
    /// Returns true if this error means the input records contradict the query.
    #[must_use]
    pub const fn is_data_consistency(&self) -> bool {
        matches!(
            self,
            Self::PlayerNotFound { .. } | Self::AmbiguousPlayer { .. }
        )
    }
}

/// Error for invalid day ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DayRangeError {
    /// First day is after last day.
    #[error("Invalid day range: {first} > {last}")]
    InvalidRange {
        /// The first day.
        first: NaiveDate,
        /// The last day.
        last: NaiveDate,
    },
}
