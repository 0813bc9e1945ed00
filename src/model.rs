// Library data model
// The persisted record describing one sticker image

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// One catalog entry. Window geometry is optional: entries that have never
/// been shown fall back to the default placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageItem {
    pub id: Uuid,
    pub display_name: String,
    pub file_path: PathBuf,
    pub last_x: Option<i32>,
    pub last_y: Option<i32>,
    pub last_width: Option<u32>,
    pub last_height: Option<u32>,
    /// Window opacity in percent, kept within 0-100.
    #[serde(deserialize_with = "deserialize_opacity")]
    pub opacity: u8,
    pub always_on_top: bool,
    pub is_pinned: bool,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    /// Rotation in degrees; normalized into [0, 360) whenever it is applied.
    pub rotation_angle: f32,
    pub is_rotation_mode_enabled: bool,
    pub last_used: Option<DateTime<Utc>>,
}

impl Default for ImageItem {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: String::new(),
            file_path: PathBuf::new(),
            last_x: None,
            last_y: None,
            last_width: None,
            last_height: None,
            opacity: 100,
            always_on_top: true,
            is_pinned: false,
            flip_horizontal: false,
            flip_vertical: false,
            rotation_angle: 0.0,
            is_rotation_mode_enabled: false,
            last_used: None,
        }
    }
}

impl ImageItem {
    /// Create a fresh entry for an image file.
    pub fn new(display_name: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            display_name: display_name.into(),
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    /// Mark the entry as used right now.
    pub fn touch(&mut self) {
        self.last_used = Some(Utc::now());
    }
}

/// Accept any persisted number and clamp it into the valid percent range, so
/// hand-edited or out-of-range values never make the whole library unreadable.
fn deserialize_opacity<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, 100) as u8)
}
