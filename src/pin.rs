// Pin policy
// Derives window-manager flags from sticker state and applies them

use crate::surface::WindowSurface;
use crate::transform::StickerState;

/// Applies click-through and z-order flags derived from the pin and
/// always-on-top state, and tracks the transient "lowered" override that lets
/// another window surface above a pinned sticker.
#[derive(Debug, Default)]
pub struct PinPolicy {
    lowered: bool,
}

impl PinPolicy {
    pub fn new() -> Self {
        Self { lowered: false }
    }

    /// Push the derived flags to the surface. Click-through follows the pin
    /// state; the window stays on top whenever it is pinned or marked
    /// always-on-top, unless a temporary lowering is in effect.
    pub fn apply(&self, state: &StickerState, surface: &mut impl WindowSurface) {
        surface.set_click_through(state.pinned);
        surface.set_pin_guard(state.pinned);
        surface.set_always_on_top(state.topmost() && !self.lowered);
    }

    /// Temporarily drop a pinned sticker out of the topmost layer. No-op for
    /// unpinned stickers or when already lowered.
    pub fn lower_temporarily(&mut self, state: &StickerState, surface: &mut impl WindowSurface) {
        if state.pinned && state.topmost() && !self.lowered {
            self.lowered = true;
            surface.set_always_on_top(false);
        }
    }

    /// Undo `lower_temporarily`. Only acts when a lowering is in effect, so it
    /// never fights with unrelated z-order changes.
    pub fn restore(&mut self, state: &StickerState, surface: &mut impl WindowSurface) {
        if self.lowered {
            self.lowered = false;
            surface.set_always_on_top(state.topmost());
        }
    }

    #[allow(dead_code)]
    pub fn is_lowered(&self) -> bool {
        self.lowered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageItem;
    use crate::transform::Rect;

    /// Minimal surface recording the flags the policy sets.
    #[derive(Default)]
    struct FlagSurface {
        bounds: Rect,
        on_top: bool,
        click_through: bool,
        pin_guard: bool,
        hidden: bool,
    }

    impl WindowSurface for FlagSurface {
        fn bounds(&self) -> Rect {
            self.bounds
        }
        fn set_bounds(&mut self, bounds: Rect) {
            self.bounds = bounds;
        }
        fn set_always_on_top(&mut self, on_top: bool) {
            self.on_top = on_top;
        }
        fn set_click_through(&mut self, click_through: bool) {
            self.click_through = click_through;
        }
        fn set_pin_guard(&mut self, pinned: bool) {
            self.pin_guard = pinned;
        }
        fn begin_move(&mut self, _pointer: (f64, f64)) {}
        fn move_drag(&mut self, _pointer: (f64, f64)) {}
        fn request_hide(&mut self) -> bool {
            if self.pin_guard {
                return false;
            }
            self.hidden = true;
            true
        }
        fn request_minimize(&mut self) -> bool {
            self.request_hide()
        }
        fn show(&mut self) {
            self.hidden = false;
        }
        fn is_hidden(&self) -> bool {
            self.hidden
        }
        fn present(&mut self, _draw: &mut dyn FnMut(&mut [u8], u32, u32)) {}
    }

    fn state() -> StickerState {
        StickerState::from_item(&ImageItem::new("x", "/x.png"))
    }

    #[test]
    fn test_pin_forces_click_through_and_topmost() {
        let mut surface = FlagSurface::default();
        let mut s = state();
        s.always_on_top = false;
        s.pinned = true;

        PinPolicy::new().apply(&s, &mut surface);
        assert!(surface.click_through);
        assert!(surface.on_top);
        assert!(surface.pin_guard);
    }

    #[test]
    fn test_unpinned_follows_always_on_top() {
        let mut surface = FlagSurface::default();
        let mut s = state();
        s.always_on_top = false;

        PinPolicy::new().apply(&s, &mut surface);
        assert!(!surface.click_through);
        assert!(!surface.on_top);

        s.always_on_top = true;
        PinPolicy::new().apply(&s, &mut surface);
        assert!(surface.on_top);
        assert!(!surface.click_through);
    }

    #[test]
    fn test_pinned_surface_rejects_hide_and_minimize() {
        let mut surface = FlagSurface::default();
        let mut s = state();
        s.pinned = true;
        PinPolicy::new().apply(&s, &mut surface);

        assert!(!surface.request_hide());
        assert!(!surface.request_minimize());
        assert!(!surface.is_hidden());
    }

    #[test]
    fn test_lower_and_restore() {
        let mut surface = FlagSurface::default();
        let mut policy = PinPolicy::new();
        let mut s = state();
        s.pinned = true;
        policy.apply(&s, &mut surface);
        assert!(surface.on_top);

        policy.lower_temporarily(&s, &mut surface);
        assert!(!surface.on_top);
        assert!(policy.is_lowered());

        // Lowering twice does not stack.
        policy.lower_temporarily(&s, &mut surface);
        assert!(policy.is_lowered());

        policy.restore(&s, &mut surface);
        assert!(surface.on_top);
        assert!(!policy.is_lowered());

        // Restore without a lowering leaves the surface alone.
        surface.on_top = false;
        policy.restore(&s, &mut surface);
        assert!(!surface.on_top);
    }

    #[test]
    fn test_lower_ignores_unpinned() {
        let mut surface = FlagSurface::default();
        let mut policy = PinPolicy::new();
        let s = state();
        policy.apply(&s, &mut surface);
        policy.lower_temporarily(&s, &mut surface);
        assert!(!policy.is_lowered());
        assert!(surface.on_top);
    }
}
