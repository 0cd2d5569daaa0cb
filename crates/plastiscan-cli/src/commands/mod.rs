pub mod config;
pub mod detect;
pub mod watch;

use std::path::Path;

use anyhow::{Context, Result};
use plastiscan_core::detector::DetectorConfig;
use tracing::debug;

/// Load a detector config from a TOML file, or the defaults when absent.
pub fn load_config(path: Option<&Path>) -> Result<DetectorConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading detector config");
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))
        }
        None => Ok(DetectorConfig::default()),
    }
}
