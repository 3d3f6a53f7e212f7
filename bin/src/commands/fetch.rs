//! Fetch command implementation.
//!
//! Streams a player's rated games, aggregates them into daily bars, extends the
//! cached series and writes the result.

use crate::display::{Format, print_summary, write_bars};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use elokline_lib::{BarCache, merge, resume_since};
use elokline_lib::prelude::*;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::pin::pin;
use std::time::Duration;

/// Fetch games for a player and write their daily rating bars.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn fetch(
    username: &str,
    speed: Speed,
    max: usize,
    since_str: Option<&str>,
    output: Option<PathBuf>,
    format: Format,
    no_cache: bool,
    base_url: String,
    token: Option<String>,
    timeout_secs: u64,
    quiet: bool,
) -> Result<()> {
    // Parse explicit start day
    let since_day = since_str
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("Invalid since date: {s}"))
        })
        .transpose()?;

    // A window fetched from an explicit day is never merged into the cache
    let cache = if no_cache || since_day.is_some() {
        None
    } else {
        Some(BarCache::with_default_path().context("Failed to initialize bar cache")?)
    };

    let cached = match &cache {
        Some(cache) => cache
            .load(username, speed)
            .context("Failed to load cached bars")?,
        None => None,
    };

    let since = match since_day {
        Some(day) => Some(day.and_time(NaiveTime::MIN).and_utc()),
        None => cached.as_deref().and_then(resume_since),
    };
    if let Some(since) = since {
        tracing::info!(%since, "fetching games created since");
    }

    // Create client
    let config = ClientConfig {
        base_url,
        timeout: Duration::from_secs(timeout_secs),
        token,
        ..Default::default()
    };
    let client = GamesClient::new(config).context("Failed to create HTTP client")?;
    let query = GamesQuery::new(username, speed)
        .with_max(max)
        .with_since(since);

    // Setup spinner, the total is unknown until the stream ends
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} games {msg}")
                .context("Invalid progress template")?,
        );
        pb.set_message(format!("{username} {speed}"));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let mut games = Vec::new();
    let mut stream = pin!(game_stream(&client, &query));
    while let Some(game) = stream.next().await {
        let game = match game {
            Ok(game) => game,
            Err(e) => {
                progress.abandon_with_message("failed");
                return Err(KlineError::from(e)).context("Failed to fetch games");
            }
        };
        games.push(game);
        progress.inc(1);
    }
    progress.finish_with_message(format!("{username} {speed}"));

    let fresh = aggregate_daily(&games, username).context("Failed to aggregate games")?;
    tracing::info!(games = games.len(), bars = fresh.len(), "aggregated games");

    let has_fresh = !fresh.is_empty();
    let bars = match cached {
        Some(cached) => merge(cached, fresh),
        None => fresh,
    };

    if bars.is_empty() {
        tracing::warn!(username, %speed, "no rated games found");
        return Ok(());
    }

    if let Some(cache) = &cache
        && has_fresh
    {
        let path = cache
            .save(username, speed, &bars)
            .context("Failed to save cached bars")?;
        tracing::debug!(path = %path.display(), "cache updated");
    }

    // Determine output path (default to <username>-<speed>.<format>)
    let output = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "{}-{}.{}",
            username.to_lowercase(),
            speed,
            format.extension()
        ))
    });

    write_bars(&bars, &output, format)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if !quiet {
        print_summary(username, speed, &bars);
        println!("\nOutput written to: {}", output.display());
    }

    Ok(())
}
