//! Core types for the elokline rating chart toolkit.
//!
//! This crate provides the fundamental data structures used throughout elokline:
//!
//! - [`RawGame`] - A single completed game as exported by the games API
//! - [`Player`] - One side of a game with its rating and rating change
//! - [`Speed`] - Game speed category (bullet, blitz, rapid, ...)
//! - [`GameStatus`] - How a game ended
//! - [`DayRange`] - Inclusive range of UTC calendar days

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod day_range;
mod error;
mod game;
mod speed;

pub use day_range::{DayIterator, DayRange, day_start_seconds, truncate_to_day};
pub use error::{DayRangeError, KlineError, Result};
pub use game::{Color, GameStatus, Player, PlayerUser, Players, RawGame};
pub use speed::{Speed, SpeedParseError};
