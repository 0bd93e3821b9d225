//! `AppConfig` struct and TOML loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use moviecrawl_api::tmdb::{DEFAULT_REQUESTS_PER_SECOND, DEFAULT_WORKERS, MAX_PAGES};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Query and client settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Fetcher and output settings.
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// TMDB query and client configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// Overrides the API base URL (e.g. a local mock).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Response language.
    pub language: String,
    /// Release year to harvest.
    pub year: u32,
    /// Sort key.
    pub sort_by: String,
    /// Include adult content.
    pub include_adult: bool,
    /// Include video-only entries.
    pub include_video: bool,
    /// Global request ceiling (0 disables throttling).
    pub requests_per_second: u32,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            language: String::from("en-US"),
            year: 2024,
            sort_by: String::from("popularity.desc"),
            include_adult: false,
            include_video: false,
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
        }
    }
}

/// Fetcher configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FetchConfig {
    /// Concurrent page requests.
    pub workers: usize,
    /// Page cap (never above 500).
    pub max_pages: u32,
    /// Extra passes over failed pages.
    pub retry_passes: u32,
    /// Output file path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            max_pages: MAX_PAGES,
            retry_passes: 0,
            output: None,
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.tmdb.year, 2024);
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.tmdb.requests_per_second, 50);
        assert_eq!(config.fetch.workers, 10);
        assert_eq!(config.fetch.max_pages, 500);
        assert_eq!(config.fetch.retry_passes, 0);
        assert!(config.fetch.output.is_none());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                base_url: Some(String::from("http://localhost:8080/3/")),
                year: 2023,
                ..TmdbConfig::default()
            },
            fetch: FetchConfig {
                workers: 4,
                output: Some(PathBuf::from("out/2023.json")),
                ..FetchConfig::default()
            },
        };

        // Act
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        // Assert
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let path = Path::new("/tmp/moviecrawl_test_nonexistent_config.toml");

        // Act
        let config = AppConfig::load(path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb]\nyear = 2022\n\n[fetch]\nretry_passes = 2\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.tmdb.year, 2022);
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.fetch.retry_passes, 2);
        assert_eq!(config.fetch.workers, 10);
    }

    #[test]
    fn test_load_empty_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[fetch]\nworkers = \"many\"\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }
}
