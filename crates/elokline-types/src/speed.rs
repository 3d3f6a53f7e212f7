//! Game speed categories.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Time-control classification of a game.
///
/// The API reports many more perf types (variants, puzzles, ...). Those are
/// kept as [`Speed::Other`] so that an unexpected value never breaks decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Speed {
    /// Under 30 seconds per side.
    UltraBullet,
    /// Under 3 minutes per side.
    Bullet,
    /// Under 8 minutes per side.
    #[default]
    Blitz,
    /// Under 25 minutes per side.
    Rapid,
    /// 25 minutes or more per side.
    Classical,
    /// Days per move.
    Correspondence,
    /// Any other perf type.
    #[serde(other)]
    Other,
}

impl Speed {
    /// Returns the API identifier of the speed.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UltraBullet => "ultraBullet",
            Self::Bullet => "bullet",
            Self::Blitz => "blitz",
            Self::Rapid => "rapid",
            Self::Classical => "classical",
            Self::Correspondence => "correspondence",
            Self::Other => "other",
        }
    }

    /// Returns true if games of this speed can be requested from the API.
    #[must_use]
    pub const fn is_queryable(&self) -> bool {
        !matches!(self, Self::Other)
    }

    /// Returns all queryable speeds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::UltraBullet,
            Self::Bullet,
            Self::Blitz,
            Self::Rapid,
            Self::Classical,
            Self::Correspondence,
        ]
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Speed {
    type Err = SpeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ultrabullet" | "ultra" => Ok(Self::UltraBullet),
            "bullet" => Ok(Self::Bullet),
            "blitz" => Ok(Self::Blitz),
            "rapid" => Ok(Self::Rapid),
            "classical" => Ok(Self::Classical),
            "correspondence" | "corr" => Ok(Self::Correspondence),
            _ => Err(SpeedParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid speed string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedParseError(String);

impl std::fmt::Display for SpeedParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid speed '{}', expected one of: ultraBullet, bullet, blitz, rapid, classical, correspondence",
            self.0
        )
    }
}

impl std::error::Error for SpeedParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_parse() {
        assert_eq!("blitz".parse::<Speed>().unwrap(), Speed::Blitz);
        assert_eq!("Rapid".parse::<Speed>().unwrap(), Speed::Rapid);
        assert_eq!("ultraBullet".parse::<Speed>().unwrap(), Speed::UltraBullet);
        assert!("chess960".parse::<Speed>().is_err());
    }

    #[test]
    fn test_speed_serde() {
        let speed: Speed = serde_json::from_str("\"ultraBullet\"").unwrap();
        assert_eq!(speed, Speed::UltraBullet);
        assert_eq!(serde_json::to_string(&Speed::Classical).unwrap(), "\"classical\"");
    }

    #[test]
    fn test_unknown_perf_is_other() {
        let speed: Speed = serde_json::from_str("\"chess960\"").unwrap();
        assert_eq!(speed, Speed::Other);
        assert!(!speed.is_queryable());
    }
}
