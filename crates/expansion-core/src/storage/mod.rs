//! Local persistence: data directory, TOML config, SQLite day storage.

mod config;
pub mod database;

pub use config::{Config, TrackerConfig};
pub use database::Database;

use std::path::PathBuf;

/// Returns `~/.config/expansion[-dev]/` based on EXPANSION_ENV.
///
/// Set EXPANSION_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("EXPANSION_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("expansion-dev")
    } else {
        base_dir.join("expansion")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
