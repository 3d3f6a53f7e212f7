//! Cache management commands (list, path, clear).

use anyhow::{Context, Result};
use elokline_lib::{BarCache, CacheEntry, Speed};
use inquire::{Confirm, Select};

fn open_cache() -> Result<BarCache> {
    BarCache::with_default_path().context("Failed to initialize bar cache")
}

/// List all cached series.
pub(crate) fn list() -> Result<()> {
    let entries = open_cache()?.list().context("Failed to list cache")?;

    if entries.is_empty() {
        println!("No cached bars.");
        return Ok(());
    }

    println!("{:<20} {:<16} {:>6} {:<12}", "USERNAME", "SPEED", "BARS", "LAST DAY");
    println!("{}", "-".repeat(57));

    for entry in &entries {
        let last_day = entry
            .last_day
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        println!(
            "{:<20} {:<16} {:>6} {:<12}",
            entry.username,
            entry.speed.as_str(),
            entry.bars,
            last_day
        );
    }

    println!("\nTotal: {} series", entries.len());
    Ok(())
}

/// Print the cache location.
pub(crate) fn path() -> Result<()> {
    println!("{}", BarCache::default_path().display());
    Ok(())
}

/// Interactively select one cached series.
fn select_entry(entries: Vec<CacheEntry>) -> Result<Option<CacheEntry>> {
    if entries.is_empty() {
        println!("No cached bars.");
        return Ok(None);
    }

    let options: Vec<String> = entries
        .iter()
        .map(|e| format!("{} | {} | {} bars", e.username, e.speed, e.bars))
        .collect();

    let selection = Select::new("Select a series to clear:", options.clone())
        .prompt()
        .context("Series selection cancelled")?;

    let index = options
        .iter()
        .position(|o| *o == selection)
        .context("Failed to parse series selection")?;

    Ok(entries.into_iter().nth(index))
}

/// Remove cached series, prompting for the target and confirmation as needed.
pub(crate) fn clear(username: Option<&str>, speed: Option<Speed>, yes: bool) -> Result<()> {
    let cache = open_cache()?;
    let entries = cache.list().context("Failed to list cache")?;

    let targets: Vec<CacheEntry> = match username {
        Some(name) => {
            let name = name.to_lowercase();
            entries
                .into_iter()
                .filter(|e| e.username == name && speed.is_none_or(|s| s == e.speed))
                .collect()
        }
        None => select_entry(
            entries
                .into_iter()
                .filter(|e| speed.is_none_or(|s| s == e.speed))
                .collect(),
        )?
        .into_iter()
        .collect(),
    };

    if targets.is_empty() {
        if username.is_some() {
            println!("Nothing cached for this player.");
        }
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new(&format!("Remove {} cached series?", targets.len()))
            .with_default(false)
            .prompt()
            .context("Confirmation cancelled")?;
        if !confirmed {
            return Ok(());
        }
    }

    for entry in &targets {
        cache
            .remove(&entry.username, entry.speed)
            .with_context(|| format!("Failed to remove {}", entry.path.display()))?;
        println!("Removed {} {}", entry.username, entry.speed);
    }

    Ok(())
}
