//! Configuration module for slack-search
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_ENV: &str = "SLACK_SEARCH_SETTINGS_PATH";

/// Load settings from `explicit`, the environment, a default location, or defaults.
///
/// Environment overrides (`SLACK_API_TOKEN` and friends) are merged last.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = match find_settings_file(explicit) {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?
        }
        None => Settings::default(),
    };

    settings.merge_env();
    Ok(settings)
}

fn find_settings_file(explicit: Option<&Path>) -> Option<PathBuf> {
    // An explicit path is used even if missing so the read error surfaces
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut candidates = vec![PathBuf::from("settings.yml")];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("slack-search/settings.yml"));
    }

    candidates.into_iter().find(|p| p.exists())
}
