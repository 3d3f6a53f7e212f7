//! Synthetic inputs for elokline benchmarks.

use elokline_lib::{Color, GameStatus, Player, Players, RawGame, Speed};

/// Name of the player every synthetic game belongs to.
pub const PLAYER: &str = "bench";

/// One millisecond-resolution day.
const DAY_MS: i64 = 86_400_000;

/// 2020-01-01T00:00:00Z in milliseconds.
const START_MS: i64 = 1_577_836_800_000;

/// Builds `days * per_day` games spread over consecutive days, with every
/// fourth day left empty so the forward fill has work to do.
///
/// Games come out newest first, the way the export API returns them.
#[must_use]
pub fn synthetic_games(days: u32, per_day: u32) -> Vec<RawGame> {
    let mut games = Vec::new();
    let mut rating = 1500.0;

    for day in 0..days {
        if day % 4 == 3 {
            continue;
        }
        for n in 0..per_day {
            let win = (day + n) % 3 != 0;
            let diff = if win { 6.0 } else { -5.0 };
            let us = Player::named(PLAYER, rating, diff);
            let them = Player::named(format!("opponent{n}"), 1500.0, -diff);
            let (players, winner) = if n % 2 == 0 {
                let winner = if win { Color::White } else { Color::Black };
                (Players { white: us, black: them }, winner)
            } else {
                let winner = if win { Color::Black } else { Color::White };
                (Players { white: them, black: us }, winner)
            };

            games.push(RawGame {
                id: format!("g{day}x{n}"),
                created_at: START_MS + i64::from(day) * DAY_MS + i64::from(n) * 60_000,
                perf: Speed::Blitz,
                players,
                winner: Some(winner),
                status: GameStatus::Resign,
            });
            rating += diff;
        }
    }

    games.reverse();
    games
}

/// Serializes games as a newline-delimited JSON body.
#[must_use]
pub fn ndjson_body(games: &[RawGame]) -> Vec<u8> {
    let mut body = Vec::new();
    for game in games {
        // Serializing plain structs into a Vec cannot fail.
        if serde_json::to_writer(&mut body, game).is_ok() {
            body.push(b'\n');
        }
    }
    body
}
