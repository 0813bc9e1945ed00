// Window surface capability
// The seam between the sticker engine and the windowing platform

use crate::transform::Rect;

/// Pointer buttons the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Keyboard commands after host-side keymap translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    ToggleRotationMode,
    Minimize,
    Close,
}

/// Everything the engine needs from a window. The Wayland implementation
/// lives in `wayland.rs`; tests drive the engine through a fake.
pub trait WindowSurface {
    /// Current bounds in the surface's coordinate space.
    fn bounds(&self) -> Rect;
    fn set_bounds(&mut self, bounds: Rect);

    fn set_always_on_top(&mut self, on_top: bool);

    /// When enabled, pointer input passes to whatever is beneath the window.
    fn set_click_through(&mut self, click_through: bool);

    /// Pinned surfaces refuse hide and minimize requests.
    fn set_pin_guard(&mut self, pinned: bool);

    /// Start a native move; subsequent motion is handled by the surface, not
    /// recomputed by the engine.
    fn begin_move(&mut self, pointer: (f64, f64));
    fn move_drag(&mut self, pointer: (f64, f64));

    /// Returns false when the request was vetoed by the pin guard.
    fn request_hide(&mut self) -> bool;
    /// Minimize collapses to hide on surfaces without a real minimized state;
    /// vetoed requests leave the window in its normal state.
    fn request_minimize(&mut self) -> bool;
    fn show(&mut self);
    fn is_hidden(&self) -> bool;

    /// Paint a frame: the callback fills a BGRA canvas of the given size, and
    /// the surface presents it with sentinel-colored pixels made transparent.
    fn present(&mut self, draw: &mut dyn FnMut(&mut [u8], u32, u32));
}
