mod config;
mod document;
mod store;

pub use config::{Config, DisplayConfig, LogConfig, StorageConfig};
pub use document::{StateRepository, DEFAULT_STORAGE_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory, creating it if needed.
///
/// `STREAKBLOOM_DATA_DIR` overrides the location. Otherwise this is
/// `~/.config/streakbloom[-dev]/`, with the `-dev` suffix when
/// `STREAKBLOOM_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("STREAKBLOOM_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("STREAKBLOOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("streakbloom-dev")
            } else {
                base_dir.join("streakbloom")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
