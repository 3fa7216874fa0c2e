//! Editor settings and their JSON file

use crate::error::{ConfigError, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Engine settings. Every field has a default so partial files load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    /// Segments shown per grid page
    pub rows_per_page: u64,
    /// Panel size below which a dragged panel collapses
    pub collapse_threshold_px: f32,
    /// Minimum size of a visible panel
    pub panel_min_size_px: f32,
    /// Backend Service executable
    pub backend_command: Option<String>,
    pub backend_args: Vec<String>,
    /// Capacity of the outbound request queue
    pub request_buffer: usize,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_filter: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            rows_per_page: 100,
            collapse_threshold_px: 40.0,
            panel_min_size_px: 40.0,
            backend_command: None,
            backend_args: Vec::new(),
            request_buffer: 256,
            log_filter: "info".to_string(),
        }
    }
}

impl EditorSettings {
    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.rows_per_page == 0 {
            return Err(invalid("rowsPerPage", "must be at least 1"));
        }
        if self.collapse_threshold_px < 0.0 {
            return Err(invalid("collapseThresholdPx", "must not be negative"));
        }
        if self.panel_min_size_px < 0.0 {
            return Err(invalid("panelMinSizePx", "must not be negative"));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> Error {
    Error::Config(ConfigError::Invalid {
        key: key.to_string(),
        reason: reason.to_string(),
    })
}

/// `<config dir>/segmenta/settings.json`
pub fn default_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("segmenta").join("settings.json"))
        .ok_or(Error::Config(ConfigError::NoConfigDir))
}

/// Load settings from `path`; a missing file yields the defaults
pub fn load(path: impl AsRef<Path>) -> Result<EditorSettings> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("No settings file at {:?}, using defaults", path);
        return Ok(EditorSettings::default());
    }

    let raw = std::fs::read_to_string(path)?;
    let settings: EditorSettings = serde_json::from_str(&raw)?;
    settings.validate()?;
    info!("Loaded settings from {:?}", path);
    Ok(settings)
}

/// Write settings as pretty JSON, creating parent directories
pub fn save(path: impl AsRef<Path>, settings: &EditorSettings) -> Result<()> {
    let path = path.as_ref();
    settings.validate()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(settings)?)?;
    Ok(())
}
