//! Game-to-daily-bar aggregation with forward fill.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use elokline_types::{Color, DayRange, KlineError, RawGame, day_start_seconds, truncate_to_day};

use crate::{DailyBar, WinLossDraw};

/// Accumulates one day of games for a single player.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DayBucket {
    /// Rating before the day's first game, then the rating after each game.
    ratings: Vec<f64>,
    results: WinLossDraw,
}

impl DayBucket {
    /// Records a game the player finished at `rating_after`, having started
    /// it at `rating_before`.
    ///
    /// The first game of the day also records `rating_before` as the open.
    pub fn push(&mut self, rating_before: f64, rating_after: f64, game: &RawGame, side: Color) {
        if self.ratings.is_empty() {
            self.ratings.push(rating_before);
        }
        self.ratings.push(rating_after);

        if game.status.is_draw() {
            self.results.draw_count += 1;
        } else if let Some(winner) = game.winner {
            if winner == side {
                self.results.win_count += 1;
            } else {
                self.results.lose_count += 1;
            }
        }
    }

    /// Returns the recorded rating snapshots in game order.
    #[must_use]
    pub fn ratings(&self) -> &[f64] {
        &self.ratings
    }

    /// Returns the number of games recorded.
    #[must_use]
    pub fn game_count(&self) -> u32 {
        self.ratings.len().saturating_sub(1) as u32
    }

    /// Finishes the day into a bar, or `None` if no game was recorded.
    #[must_use]
    pub fn finish(&self, day: NaiveDate) -> Option<DailyBar> {
        let (&open, &close) = (self.ratings.first()?, self.ratings.last()?);
        let (high, low) = self
            .ratings
            .iter()
            .fold((f64::NEG_INFINITY, f64::INFINITY), |(high, low), &r| {
                (high.max(r), low.min(r))
            });

        Some(DailyBar {
            time: day_start_seconds(day),
            open,
            close,
            high,
            low,
            game_count: Some(self.game_count()),
            win_lose_draw_count: Some(self.results),
        })
    }
}

/// Aggregates a player's games into one bar per UTC calendar day.
///
/// The games are ordered by creation time (stable for equal timestamps; the
/// caller's slice is left untouched) and attributed to the side played by
/// `username`. Each day opens at the rating before its first game. Days
/// between the first and the last game day that have no games repeat the
/// previous close.
///
/// Games whose post-game rating is missing or not finite, or whose timestamp
/// cannot be represented, are skipped.
///
/// Returns an empty series if no game contributes a rating.
///
/// # Errors
///
/// Returns [`KlineError::PlayerNotFound`] or [`KlineError::AmbiguousPlayer`]
/// if any game cannot be attributed to exactly one side. No partial series is
/// returned in that case.
pub fn aggregate_daily(games: &[RawGame], username: &str) -> Result<Vec<DailyBar>, KlineError> {
    let mut ordered: Vec<&RawGame> = games.iter().collect();
    ordered.sort_by_key(|game| game.created_at);

    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    let mut skipped = 0usize;

    for game in ordered {
        let side = game.side_of(username)?;
        let player = game.players.side(side);

        let (Some(before), Some(after)) = (player.rating, player.rating_after()) else {
            tracing::debug!(game = %game.id, "skipping game without a usable rating");
            skipped += 1;
            continue;
        };
        let Some(day) = truncate_to_day(game.created_at) else {
            tracing::debug!(game = %game.id, created_at = game.created_at, "skipping game with invalid timestamp");
            skipped += 1;
            continue;
        };

        buckets.entry(day).or_default().push(before, after, game, side);
    }

    if skipped > 0 {
        tracing::info!(skipped, "games skipped during aggregation");
    }

    let (Some(&first), Some(&last)) = (buckets.keys().next(), buckets.keys().next_back()) else {
        return Ok(Vec::new());
    };
    let range = DayRange::new(first, last)?;

    Ok(forward_fill(range, &buckets))
}

/// Emits one bar per day of `range`, carrying the last close over empty days.
fn forward_fill(range: DayRange, buckets: &BTreeMap<NaiveDate, DayBucket>) -> Vec<DailyBar> {
    let mut bars = Vec::with_capacity(range.total_days());
    let mut previous_close = 0.0;

    for day in range.days() {
        let bar = buckets
            .get(&day)
            .and_then(|bucket| bucket.finish(day))
            .unwrap_or_else(|| DailyBar::flat(day, previous_close));
        previous_close = bar.close;
        bars.push(bar);
    }

    bars
}
