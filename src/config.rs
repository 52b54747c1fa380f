//! Configuration management for the bookmark search server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is honoured if present; nothing is written to stdout, which the MCP
//! transport owns.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// Display settings for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySettings {
    /// Maximum number of words shown in a result title
    pub max_title_words: usize,

    /// Characters kept before the first highlight in a snippet
    pub context_before: usize,

    /// Characters kept after the start of the first highlight in a snippet
    pub context_after: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            max_title_words: 5,
            context_before: 40,
            context_after: 40,
        }
    }
}

/// Configuration for the bookmark search server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Exported bookmark tree (JSON)
    pub bookmarks_file: PathBuf,

    /// Snapshot file for indexed documents; in-memory only when unset
    pub store_path: Option<PathBuf>,

    /// Page fetch timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Result presentation settings
    pub display: DisplaySettings,

    /// Log level used when RUST_LOG is not set (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `BOOKMARKS_FILE`: Path of the exported bookmark tree
    ///
    /// Optional environment variables:
    /// - `BOOKMARK_STORE_PATH`: Snapshot file for indexed documents
    /// - `REQUEST_TIMEOUT`: Page fetch timeout in seconds (default: 10)
    /// - `MAX_DISPLAY_TITLE_WORDS`: Words shown per result title (default: 5)
    /// - `SNIPPET_CONTEXT_BEFORE`: Characters before a highlight (default: 40)
    /// - `SNIPPET_CONTEXT_AFTER`: Characters after a highlight (default: 40)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let bookmarks_file = env::var("BOOKMARKS_FILE")
            .map_err(|_| ConfigError::MissingVar("BOOKMARKS_FILE".to_string()))?;

        if bookmarks_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "BOOKMARKS_FILE".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let store_path = env::var("BOOKMARK_STORE_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let max_title_words = Self::parse_env_usize("MAX_DISPLAY_TITLE_WORDS", 5)?;
        let context_before = Self::parse_env_usize("SNIPPET_CONTEXT_BEFORE", 40)?;
        let context_after = Self::parse_env_usize("SNIPPET_CONTEXT_AFTER", 40)?;

        if max_title_words == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_DISPLAY_TITLE_WORDS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            bookmarks_file: PathBuf::from(bookmarks_file),
            store_path,
            request_timeout,
            display: DisplaySettings {
                max_title_words,
                context_before,
                context_after,
            },
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bookmarks_file: PathBuf::from("bookmarks.json"),
            store_path: None,
            request_timeout: 10,
            display: DisplaySettings::default(),
            log_level: "error".to_string(),
        }
    }
}
