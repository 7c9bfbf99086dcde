mod config;

pub use config::{Config, NotificationsConfig, PlaybackConfig};

use std::path::PathBuf;

/// Returns `~/.config/fitloop[-dev]/` based on FITLOOP_ENV.
///
/// Set FITLOOP_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FITLOOP_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("fitloop-dev")
    } else {
        base_dir.join("fitloop")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
