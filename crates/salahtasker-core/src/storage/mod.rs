pub mod database;
pub mod prayer_cache;
pub mod settings;
pub mod task_db;

pub use database::Database;
pub use prayer_cache::{CacheKey, CacheStore};
pub use task_db::{NewTask, TaskUpdate};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/salahtasker[-dev]/` based on SALAHTASKER_ENV.
///
/// Set SALAHTASKER_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SALAHTASKER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("salahtasker-dev")
    } else {
        base_dir.join("salahtasker")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::QueryFailed(e.to_string()))?;
    Ok(dir)
}
