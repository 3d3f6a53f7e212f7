//! Daily rating candlestick aggregation for the elokline toolkit.
//!
//! This crate turns game records into a gap-free daily series:
//!
//! - [`DailyBar`] - One day's open/close/high/low rating and results
//! - [`DayBucket`] - Per-day accumulator of rating snapshots and results
//! - [`aggregate_daily`] - Sort, bucket and forward-fill a list of games

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod bar;

pub use aggregator::{DayBucket, aggregate_daily};
pub use bar::{DailyBar, WinLossDraw};
