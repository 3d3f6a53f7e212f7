//! On-disk cache of elokline daily rating bars.
//!
//! - [`BarCache`] - Persistent storage of one series per player and speed
//! - [`CacheEntry`] - Summary of a cached series
//! - [`resume_since`] - Where the next fetch should start
//! - [`merge`] - Appends fresh bars to a cached series

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod resume;
mod store;

pub use resume::{merge, resume_since};
pub use store::{BarCache, CacheEntry, CacheError, Result};
