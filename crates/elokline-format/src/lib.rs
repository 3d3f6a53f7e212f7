//! Output formatters for elokline daily rating bars.
//!
//! This crate provides formatters for writing daily bars to various output
//! formats:
//!
//! - [`CsvFormatter`] - CSV format
//! - [`JsonFormatter`] - JSON array or NDJSON of bars or chart rows
//! - [`ChartFormatter`] - Candlestick chart rows
//! - [`ParquetFormatter`] - Apache Parquet columnar format

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(feature = "json")]
mod chart;
#[cfg(feature = "csv")]
mod csv;
mod formatter;
#[cfg(feature = "json")]
mod json;

#[cfg(feature = "parquet")]
mod parquet;

#[cfg(feature = "csv")]
pub use crate::csv::CsvFormatter;
#[cfg(feature = "json")]
pub use chart::{ChartFormatter, ChartRow, chart_row};
pub use formatter::{FormatError, Formatter, OutputFormat};
#[cfg(feature = "json")]
pub use json::{JsonFormatter, JsonRows, JsonStyle};

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;

/// A played day followed by a forward-filled day.
#[cfg(all(test, any(feature = "csv", feature = "json", feature = "parquet")))]
pub(crate) fn test_bars() -> Vec<elokline_aggregate::DailyBar> {
    use elokline_aggregate::{DailyBar, WinLossDraw};

    let played = DailyBar {
        time: 1_704_067_200,
        open: 1500.0,
        close: 1505.0,
        high: 1510.0,
        low: 1500.0,
        game_count: Some(2),
        win_lose_draw_count: Some(WinLossDraw {
            win_count: 1,
            lose_count: 1,
            draw_count: 0,
        }),
    };
    let next_day = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let filled = DailyBar::flat(next_day, played.close);
    vec![played, filled]
}
