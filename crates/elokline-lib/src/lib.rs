//! Daily rating candlesticks from Lichess game history.
//!
//! This is a facade crate that re-exports functionality from the elokline
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use elokline_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GamesClient::with_defaults()?;
//!     let query = GamesQuery::new("alice", Speed::Blitz);
//!
//!     let games = collect_games(game_stream(&client, &query)).await?;
//!     let bars = aggregate_daily(&games, "alice")?;
//!
//!     for bar in &bars {
//!         println!("{:?} {} -> {}", bar.day(), bar.open, bar.close);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use elokline_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use elokline_fetch::{
    ClientConfig, DEFAULT_MAX_GAMES, FetchError, GamesClient, GamesQuery, LineDecoder,
    collect_games, game_stream, ndjson_stream,
};

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use elokline_aggregate::{DailyBar, DayBucket, WinLossDraw, aggregate_daily};

// Re-export formatters
#[cfg(feature = "format")]
pub use elokline_format::{
    ChartFormatter, ChartRow, CsvFormatter, FormatError, Formatter, JsonFormatter, JsonRows,
    JsonStyle, OutputFormat, chart_row,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use elokline_format::ParquetFormatter;

// Re-export the bar cache
#[cfg(feature = "cache")]
pub use elokline_cache::{BarCache, CacheEntry, CacheError, merge, resume_since};

/// Prelude module for convenient imports.
///
/// ```
/// use elokline_lib::prelude::*;
/// ```
pub mod prelude {
    pub use elokline_types::{
        Color, DayRange, GameStatus, KlineError, RawGame, Result, Speed, truncate_to_day,
    };

    #[cfg(feature = "fetch")]
    pub use elokline_fetch::{ClientConfig, GamesClient, GamesQuery, collect_games, game_stream};

    #[cfg(feature = "aggregate")]
    pub use elokline_aggregate::{DailyBar, WinLossDraw, aggregate_daily};

    #[cfg(feature = "format")]
    pub use elokline_format::{ChartFormatter, CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use elokline_format::ParquetFormatter;

    #[cfg(feature = "cache")]
    pub use elokline_cache::BarCache;
}
