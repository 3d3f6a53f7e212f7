//! Daily rating candlestick.

use chrono::{DateTime, NaiveDate, Utc};
use elokline_types::day_start_seconds;
use serde::{Deserialize, Serialize};

/// Game results of one day from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinLossDraw {
    /// Games won.
    pub win_count: u32,
    /// Games lost.
    pub lose_count: u32,
    /// Games drawn.
    pub draw_count: u32,
}

/// Rating candlestick for one UTC calendar day.
///
/// Days on which no game was played carry the previous close in all four
/// prices and no counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBar {
    /// UTC midnight of the day, in seconds since the Unix epoch.
    pub time: i64,
    /// Rating before the day's first game.
    pub open: f64,
    /// Rating after the day's last game.
    pub close: f64,
    /// Highest rating of the day.
    pub high: f64,
    /// Lowest rating of the day.
    pub low: f64,
    /// Number of games played.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_count: Option<u32>,
    /// Results of the games played.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_lose_draw_count: Option<WinLossDraw>,
}

impl DailyBar {
    /// Creates a bar for a day without games, every price at `rating`.
    #[must_use]
    pub fn flat(day: NaiveDate, rating: f64) -> Self {
        Self {
            time: day_start_seconds(day),
            open: rating,
            close: rating,
            high: rating,
            low: rating,
            game_count: None,
            win_lose_draw_count: None,
        }
    }

    /// Returns the bar's day.
    #[must_use]
    pub fn day(&self) -> Option<NaiveDate> {
        DateTime::<Utc>::from_timestamp(self.time, 0).map(|dt| dt.date_naive())
    }

    /// Returns the bar time in milliseconds, as charting libraries expect.
    #[must_use]
    pub const fn time_millis(&self) -> i64 {
        self.time * 1000
    }

    /// Returns true if the bar was synthesized for a day without games.
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        self.game_count.is_none()
    }

    /// Returns the rating change over the day (close - open).
    #[must_use]
    pub fn change(&self) -> f64 {
        self.close - self.open
    }

    /// Returns the rating range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if the player gained rating over the day.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if the player lost rating over the day.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}
