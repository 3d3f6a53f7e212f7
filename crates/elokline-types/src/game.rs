//! Game records as exported by the games API.

use serde::{Deserialize, Serialize};

use crate::{KlineError, Speed};

/// Side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// The side that moves first.
    White,
    /// The side that moves second.
    Black,
}

impl Color {
    /// Returns the opposite side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns the side as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Checkmate.
    Mate,
    /// One side resigned.
    Resign,
    /// Agreed or claimed draw.
    Draw,
    /// Stalemate.
    Stalemate,
    /// One side ran out of time.
    OutOfTime,
    /// Game aborted before it really started.
    Aborted,
    /// Any other termination reported by the API.
    #[serde(other)]
    Other,
}

impl GameStatus {
    /// Returns true if the game ended drawn regardless of any winner field.
    #[must_use]
    pub const fn is_draw(&self) -> bool {
        matches!(self, Self::Draw | Self::Stalemate)
    }
}

/// Account reference of a player.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerUser {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Lowercase account identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// One side of a game.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Account of the player, absent for anonymous or engine opponents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<PlayerUser>,
    /// Rating before the game.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Signed rating change caused by the game.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_diff: Option<f64>,
}

impl Player {
    /// Creates a rated player with the given display name.
    #[must_use]
    pub fn named(name: impl Into<String>, rating: f64, rating_diff: f64) -> Self {
        Self {
            user: Some(PlayerUser {
                name: Some(name.into()),
                id: None,
            }),
            rating: Some(rating),
            rating_diff: Some(rating_diff),
        }
    }

    /// Returns true if this side belongs to `username`.
    ///
    /// The display name is compared case-insensitively. The account id is
    /// only consulted when the name is absent.
    #[must_use]
    pub fn is_user(&self, username: &str) -> bool {
        self.user
            .as_ref()
            .and_then(|user| user.name.as_deref().or(user.id.as_deref()))
            .is_some_and(|name| name.to_lowercase() == username.to_lowercase())
    }

    /// Returns the rating after the game, or `None` if it is not a finite number.
    #[must_use]
    pub fn rating_after(&self) -> Option<f64> {
        let after = self.rating? + self.rating_diff?;
        after.is_finite().then_some(after)
    }
}

/// Both sides of a game.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Players {
    /// The white side.
    pub white: Player,
    /// The black side.
    pub black: Player,
}

impl Players {
    /// Returns the given side.
    #[must_use]
    pub const fn side(&self, color: Color) -> &Player {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

/// A single completed game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGame {
    /// Unique game identifier.
    pub id: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: i64,
    /// Speed category of the game.
    pub perf: Speed,
    /// Both sides.
    pub players: Players,
    /// Winning side, absent on draws and unfinished games.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Color>,
    /// How the game ended.
    pub status: GameStatus,
}

impl RawGame {
    /// Determines which side `username` played.
    ///
    /// # Errors
    ///
    /// Returns [`KlineError::PlayerNotFound`] if neither side matches and
    /// [`KlineError::AmbiguousPlayer`] if both do.
    pub fn side_of(&self, username: &str) -> Result<Color, KlineError> {
        match (
            self.players.white.is_user(username),
            self.players.black.is_user(username),
        ) {
            (true, false) => Ok(Color::White),
            (false, true) => Ok(Color::Black),
            (false, false) => Err(KlineError::PlayerNotFound {
                game_id: self.id.clone(),
                username: username.to_string(),
            }),
            (true, true) => Err(KlineError::AmbiguousPlayer {
                game_id: self.id.clone(),
                username: username.to_string(),
            }),
        }
    }
}
