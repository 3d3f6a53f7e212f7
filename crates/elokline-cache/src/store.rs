//! Persistent storage of daily bar series.

use chrono::NaiveDate;
use directories::ProjectDirs;
use elokline_aggregate::DailyBar;
use elokline_types::{KlineError, Speed};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to create a directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to delete a file.
    #[error("Failed to delete file '{path}': {source}")]
    DeleteFile {
        /// The path that could not be deleted.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse a cache file.
    #[error("Failed to parse cache file '{path}': {source}")]
    ParseJson {
        /// The path that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Failed to serialize bars.
    #[error("Failed to serialize bars: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// Failed to read a directory.
    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl From<CacheError> for KlineError {
    fn from(error: CacheError) -> Self {
        Self::Cache(error.to_string())
    }
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Summary of one cached series.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Player name, as stored (lowercase).
    pub username: String,
    /// Speed category of the series.
    pub speed: Speed,
    /// Number of cached bars.
    pub bars: usize,
    /// Last cached day, if any.
    pub last_day: Option<NaiveDate>,
    /// Location of the cache file.
    pub path: PathBuf,
}

/// Stores daily bar series as pretty JSON files.
///
/// Series live at `{base}/bars/{username}/{speed}.json`, with the username
/// lowercased so that lookups are case-insensitive like the API.
#[derive(Debug, Clone)]
pub struct BarCache {
    /// Base directory for cache storage.
    base_path: PathBuf,
    /// Directory holding one subdirectory per player.
    bars_path: PathBuf,
}

impl BarCache {
    /// Creates a cache rooted at the given base path.
    ///
    /// Creates the necessary subdirectories if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn new(base_path: PathBuf) -> Result<Self> {
        let bars_path = base_path.join("bars");

        for path in [&base_path, &bars_path] {
            if !path.exists() {
                fs::create_dir_all(path).map_err(|e| CacheError::CreateDir {
                    path: path.clone(),
                    source: e,
                })?;
            }
        }

        Ok(Self {
            base_path,
            bars_path,
        })
    }

    /// Returns the default path for elokline data.
    ///
    /// Uses the `directories` crate to find the appropriate location:
    /// - Linux: `~/.local/share/elokline/`
    /// - macOS: `~/Library/Application Support/elokline/`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\elokline\`
    ///
    /// Falls back to `~/.elokline/` if the platform-specific location
    /// cannot be determined.
    #[must_use]
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "elokline").map_or_else(dirs_fallback, |proj_dirs| {
            proj_dirs.data_dir().to_path_buf()
        })
    }

    /// Creates a cache at the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn with_default_path() -> Result<Self> {
        Self::new(Self::default_path())
    }

    /// Returns the base path for cache storage.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the path of a player's series for one speed.
    #[must_use]
    pub fn entry_path(&self, username: &str, speed: Speed) -> PathBuf {
        self.bars_path
            .join(username.to_lowercase())
            .join(format!("{speed}.json"))
    }

    /// Loads a cached series.
    ///
    /// Returns `Ok(None)` when nothing is cached for the player and speed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self, username: &str, speed: Speed) -> Result<Option<Vec<DailyBar>>> {
        let path = self.entry_path(username, speed);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no cached bars");
            return Ok(None);
        }

        let bars = read_bars(&path)?;
        tracing::debug!(path = %path.display(), bars = bars.len(), "loaded cached bars");
        Ok(Some(bars))
    }

    /// Saves a series, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the bars cannot be serialized or written to disk.
    pub fn save(&self, username: &str, speed: Speed, bars: &[DailyBar]) -> Result<PathBuf> {
        let path = self.entry_path(username, speed);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CacheError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(bars)?;
        fs::write(&path, json).map_err(|e| CacheError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), bars = bars.len(), "saved bars");
        Ok(path)
    }

    /// Removes a cached series.
    ///
    /// Returns `false` if nothing was cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be deleted.
    pub fn remove(&self, username: &str, speed: Speed) -> Result<bool> {
        let path = self.entry_path(username, speed);

        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path).map_err(|e| CacheError::DeleteFile {
            path: path.clone(),
            source: e,
        })?;

        // Drop the player directory once its last series is gone.
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }

        Ok(true)
    }

    /// Lists all cached series, sorted by username then speed.
    ///
    /// Corrupt files are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directories cannot be read.
    pub fn list(&self) -> Result<Vec<CacheEntry>> {
        let mut entries = Vec::new();

        for player_dir in read_dir(&self.bars_path)? {
            if !player_dir.is_dir() {
                continue;
            }
            let Some(username) = player_dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            for path in read_dir(&player_dir)? {
                if !path.extension().is_some_and(|ext| ext == "json") {
                    continue;
                }
                let Some(speed) = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(|s| s.parse::<Speed>().ok())
                else {
                    tracing::warn!(path = %path.display(), "ignoring unknown cache file");
                    continue;
                };

                match read_bars(&path) {
                    Ok(bars) => entries.push(CacheEntry {
                        username: username.to_string(),
                        speed,
                        bars: bars.len(),
                        last_day: bars.last().and_then(DailyBar::day),
                        path,
                    }),
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping corrupt cache file");
                    }
                }
            }
        }

        entries.sort_by(|a, b| {
            a.username
                .cmp(&b.username)
                .then_with(|| a.speed.as_str().cmp(b.speed.as_str()))
        });

        Ok(entries)
    }
}

/// Reads and parses one cache file.
fn read_bars(path: &Path) -> Result<Vec<DailyBar>> {
    let content = fs::read_to_string(path).map_err(|e| CacheError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| CacheError::ParseJson {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Returns the paths inside a directory.
fn read_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| CacheError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    entries
        .map(|entry| {
            entry.map(|e| e.path()).map_err(|e| CacheError::ReadDir {
                path: dir.to_path_buf(),
                source: e,
            })
        })
        .collect()
}

/// Fallback for determining home directory.
fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".elokline")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn create_test_bars() -> Vec<DailyBar> {
        vec![DailyBar::flat(day(1), 1500.0), DailyBar::flat(day(2), 1500.0)]
    }

    #[test]
    fn test_cache_creation() {
        let temp_dir = TempDir::new().unwrap();
        let cache = BarCache::new(temp_dir.path().to_path_buf()).unwrap();

        assert!(cache.base_path().exists());
        assert!(temp_dir.path().join("bars").exists());
    }

    #[test]
    fn test_entry_path_lowercases_username() {
        let temp_dir = TempDir::new().unwrap();
        let cache = BarCache::new(temp_dir.path().to_path_buf()).unwrap();

        let path = cache.entry_path("Magnus", Speed::Blitz);
        assert!(path.ends_with("bars/magnus/blitz.json"));
    }

    #[test]
    fn test_load_missing() {
        let temp_dir = TempDir::new().unwrap();
        let cache = BarCache::new(temp_dir.path().to_path_buf()).unwrap();

        assert!(cache.load("nobody", Speed::Blitz).unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let cache = BarCache::new(temp_dir.path().to_path_buf()).unwrap();
        let bars = create_test_bars();

        cache.save("Alice", Speed::Rapid, &bars).unwrap();

        let loaded = cache.load("alice", Speed::Rapid).unwrap().unwrap();
        assert_eq!(loaded, bars);
        assert!(cache.load("alice", Speed::Blitz).unwrap().is_none());
    }

    #[test]
    fn test_load_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let cache = BarCache::new(temp_dir.path().to_path_buf()).unwrap();

        let path = cache.entry_path("alice", Speed::Blitz);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            cache.load("alice", Speed::Blitz),
            Err(CacheError::ParseJson { .. })
        ));
    }

    #[test]
    fn test_list() {
        let temp_dir = TempDir::new().unwrap();
        let cache = BarCache::new(temp_dir.path().to_path_buf()).unwrap();

        cache.save("bob", Speed::Blitz, &create_test_bars()).unwrap();
        cache.save("alice", Speed::Rapid, &create_test_bars()).unwrap();
        cache.save("alice", Speed::Blitz, &[]).unwrap();

        let corrupt = cache.entry_path("carol", Speed::Bullet);
        fs::create_dir_all(corrupt.parent().unwrap()).unwrap();
        fs::write(&corrupt, "{").unwrap();

        let entries = cache.list().unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].username, "alice");
        assert_eq!(entries[0].speed, Speed::Blitz);
        assert_eq!(entries[0].bars, 0);
        assert_eq!(entries[0].last_day, None);

        assert_eq!(entries[1].speed, Speed::Rapid);
        assert_eq!(entries[1].last_day, Some(day(2)));

        assert_eq!(entries[2].username, "bob");
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let cache = BarCache::new(temp_dir.path().to_path_buf()).unwrap();

        cache.save("alice", Speed::Blitz, &create_test_bars()).unwrap();
        assert!(cache.remove("ALICE", Speed::Blitz).unwrap());
        assert!(!cache.remove("alice", Speed::Blitz).unwrap());
        assert!(cache.list().unwrap().is_empty());
    }

    #[test]
    fn test_cache_error_into_kline_error() {
        let error = CacheError::SerializeJson(serde_json::from_str::<u8>("x").unwrap_err());
        assert!(matches!(KlineError::from(error), KlineError::Cache(_)));
    }
}
