// Image library persistence
// Loads and saves the sticker collection as JSON

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::model::ImageItem;
use crate::prompt;

const LIBRARY_FILE: &str = "library.json";

/// The JSON-backed item store. Loading never fails: an absent, empty or
/// unparsable file yields an empty collection. Save failures are reported to
/// the user and logged, never propagated; in-memory state stays intact so a
/// later mutation can retry.
pub struct ImageLibrary {
    path: PathBuf,
}

impl ImageLibrary {
    /// Library under the platform data directory, creating it if needed.
    pub fn open_default() -> Result<Self> {
        let data_dir = dirs::data_dir().context("No data directory available")?;
        let app_dir = data_dir.join("stickpin");
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("Failed to create {}", app_dir.display()))?;
        Ok(Self {
            path: app_dir.join(LIBRARY_FILE),
        })
    }

    /// Library at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Vec<ImageItem> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(_) => return Vec::new(),
        };
        if json.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str(&json) {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    "Library file {} is unreadable ({}), starting empty",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    pub fn save(&self, items: &[ImageItem]) {
        if let Err(e) = self.try_save(items) {
            prompt::notify_error(
                "Library save failed",
                &format!("Could not save {}: {}", self.path.display(), e),
            );
        }
    }

    fn try_save(&self, items: &[ImageItem]) -> Result<()> {
        let json = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        info!("Saved {} items to {}", items.len(), self.path.display());
        Ok(())
    }
}
