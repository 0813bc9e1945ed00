// Sticker window state
// Per-window geometry, rotation, flips, opacity and pin flags

use crate::model::ImageItem;

/// Minimum window size in either dimension.
pub const MIN_SIZE: u32 = 50;

/// Placement used when an item has no saved geometry.
pub const DEFAULT_POSITION: (i32, i32) = (100, 100);
pub const DEFAULT_SIZE: (u32, u32) = (300, 300);

/// Window bounds in surface coordinates (top-left origin).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x as f64
            && y >= self.y as f64
            && x < (self.x + self.width as i32) as f64
            && y < (self.y + self.height as i32) as f64
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

/// Mutable visual state of one sticker window. Lives exactly as long as the
/// window; written back to the owning `ImageItem` when the library is saved.
#[derive(Debug, Clone)]
pub struct StickerState {
    pub bounds: Rect,
    opacity: u8,
    pub always_on_top: bool,
    pub pinned: bool,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    rotation_angle: f32,
    pub rotation_mode: bool,
}

impl StickerState {
    pub fn from_item(item: &ImageItem) -> Self {
        let (x, y) = match (item.last_x, item.last_y) {
            (Some(x), Some(y)) => (x, y),
            _ => DEFAULT_POSITION,
        };
        let (width, height) = match (item.last_width, item.last_height) {
            (Some(w), Some(h)) => (w.max(MIN_SIZE), h.max(MIN_SIZE)),
            _ => DEFAULT_SIZE,
        };
        Self {
            bounds: Rect::new(x, y, width, height),
            opacity: item.opacity.min(100),
            always_on_top: item.always_on_top,
            pinned: item.is_pinned,
            flip_horizontal: item.flip_horizontal,
            flip_vertical: item.flip_vertical,
            rotation_angle: normalize_angle(item.rotation_angle),
            rotation_mode: item.is_rotation_mode_enabled,
        }
    }

    /// Write flags back to the item. Geometry is written separately because it
    /// is only valid while the window is in its normal display state.
    pub fn write_flags(&self, item: &mut ImageItem) {
        item.opacity = self.opacity;
        item.always_on_top = self.always_on_top;
        item.is_pinned = self.pinned;
        item.flip_horizontal = self.flip_horizontal;
        item.flip_vertical = self.flip_vertical;
        item.rotation_angle = self.rotation_angle;
        item.is_rotation_mode_enabled = self.rotation_mode;
    }

    pub fn write_geometry(&self, item: &mut ImageItem) {
        item.last_x = Some(self.bounds.x);
        item.last_y = Some(self.bounds.y);
        item.last_width = Some(self.bounds.width);
        item.last_height = Some(self.bounds.height);
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    pub fn set_opacity(&mut self, percent: u8) {
        self.opacity = percent.min(100);
    }

    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }

    pub fn set_rotation(&mut self, angle: f32) {
        self.rotation_angle = normalize_angle(angle);
    }

    /// Effective z-order flag: pinned stickers are always kept on top.
    pub fn topmost(&self) -> bool {
        self.always_on_top || self.pinned
    }
}

/// Normalize an angle in degrees into [0, 360).
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a < 0.0 {
        a += 360.0;
    }
    // -0.0 % 360.0 is -0.0; keep the result non-negative.
    if a >= 360.0 || a == 0.0 {
        a = 0.0;
    }
    a
}
