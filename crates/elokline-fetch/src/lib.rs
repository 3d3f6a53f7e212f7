//! Streaming game export client for the elokline rating chart toolkit.
//!
//! This crate provides the ingestion pipeline:
//!
//! - [`url::games_url`] / [`GamesQuery`] - Export endpoint and query parameters
//! - [`GamesClient`] - HTTP client with retries on connection setup
//! - [`LineDecoder`] / [`ndjson_stream`] - Incremental newline-delimited JSON decoding
//! - [`game_stream`] - Lazy stream of game records

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod ndjson;
mod stream;
pub mod url;

pub use client::{ClientConfig, FetchError, GamesClient, NDJSON_MEDIA_TYPE};
pub use ndjson::{Line, LineDecoder, decode_line, ndjson_stream};
pub use stream::{collect_games, game_stream};
pub use url::{DEFAULT_MAX_GAMES, GamesQuery};
