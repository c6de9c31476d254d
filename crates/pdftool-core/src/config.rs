// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

/// Name of the settings file inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Where extracted images end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageExportMode {
    /// One file per image inside a timestamped folder.
    #[default]
    Folder,
    /// All images packed into a single ZIP archive.
    Zip,
}

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base directory for split pages and extracted images.
    /// `None` means "ask every time, starting in the home directory".
    pub export_dir: Option<PathBuf>,
    /// How the image extractor writes its results.
    pub image_export: ImageExportMode,
    /// Directory of the most recently opened PDF, used as dialog start point.
    pub last_open_dir: Option<PathBuf>,
    /// Include the output path in success messages.
    pub show_output_path: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            export_dir: None,
            image_export: ImageExportMode::Folder,
            last_open_dir: None,
            show_output_path: true,
        }
    }
}

impl AppConfig {
    /// Load the config from `dir/config.json`.
    ///
    /// Returns `None` when the file is missing or unreadable so the caller can
    /// fall back to defaults.
    pub fn load(dir: &Path) -> Option<Self> {
        let path = dir.join(CONFIG_FILE);
        let data = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&data) {
            Ok(config) => {
                debug!(path = %path.display(), "config loaded");
                Some(config)
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring malformed config");
                None
            }
        }
    }

    /// Persist the config as pretty JSON in `dir/config.json`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }
}
