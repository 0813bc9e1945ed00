// Overlay engine
// One sticker window: input routing, redraw scheduling and persistence hooks

use std::time::{Duration, Instant};

use log::debug;
use uuid::Uuid;

use crate::compositor::{self, FrameParams, Quality};
use crate::fade::FadeIn;
use crate::gesture::{Gesture, GestureTracker, MotionOutcome, PressOutcome, ReleaseOutcome};
use crate::image_loader::ImageData;
use crate::menu::{ContextMenu, MenuAction};
use crate::model::ImageItem;
use crate::persist::SaveScheduler;
use crate::pin::PinPolicy;
use crate::surface::{KeyCommand, PointerButton, WindowSurface};
use crate::transform::{StickerState, DEFAULT_POSITION, MIN_SIZE};

/// Minimum interval between throttled redraws (~60 per second).
const REDRAW_INTERVAL: Duration = Duration::from_millis(16);

/// Effects the engine cannot perform itself; the host executes them against
/// the shared item collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    /// Write this window's state back to its item and save the library.
    SaveLibrary,
    CloseWindow,
    /// Ask for confirmation, then drop the item from the library and close.
    RemoveFromLibrary,
}

pub struct StickerWindow<S: WindowSurface> {
    item_id: Uuid,
    display_name: String,
    /// Transient stickers (piped input) are never written to the library.
    transient: bool,
    surface: S,
    state: StickerState,
    gesture: GestureTracker,
    fade: FadeIn,
    saver: SaveScheduler,
    pin: PinPolicy,
    menu: ContextMenu,
    image: Option<ImageData>,
    hovered: bool,
    needs_redraw: bool,
    last_draw: Option<Instant>,
}

impl<S: WindowSurface> StickerWindow<S> {
    pub fn new(item: &ImageItem, mut surface: S, transient: bool, now: Instant) -> Self {
        let state = StickerState::from_item(item);
        surface.set_bounds(state.bounds);
        let pin = PinPolicy::new();
        pin.apply(&state, &mut surface);
        Self {
            item_id: item.id,
            display_name: item.display_name.clone(),
            transient,
            surface,
            state,
            gesture: GestureTracker::new(),
            fade: FadeIn::new(now),
            saver: SaveScheduler::new(),
            pin,
            menu: ContextMenu::new(),
            image: None,
            hovered: false,
            needs_redraw: true,
            last_draw: None,
        }
    }

    pub fn item_id(&self) -> Uuid {
        self.item_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn state(&self) -> &StickerState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The decoded image arrived; restart the fade so it ramps in visibly.
    pub fn set_image(&mut self, image: ImageData, now: Instant) {
        self.image = Some(image);
        self.fade.restart(now);
        self.needs_redraw = true;
    }

    /// Write current state back to the owning item. Geometry only applies
    /// while the window is in its normal display state, and the usage stamp
    /// moves only when the geometry actually changed.
    pub fn sync_item(&self, item: &mut ImageItem) {
        self.state.write_flags(item);
        if !self.surface.is_hidden() {
            let moved = item.last_x != Some(self.state.bounds.x)
                || item.last_y != Some(self.state.bounds.y)
                || item.last_width != Some(self.state.bounds.width)
                || item.last_height != Some(self.state.bounds.height);
            self.state.write_geometry(item);
            if moved {
                item.touch();
            }
        }
    }

    pub fn pointer_enter(&mut self) {
        if self.state.pinned {
            return;
        }
        self.hovered = true;
        self.needs_redraw = true;
    }

    pub fn pointer_leave(&mut self) -> Option<HostAction> {
        let mut action = None;
        if self.gesture.is_active() {
            // The pointer is gone mid-gesture; treat it as a completed one so
            // nothing is left half-applied.
            self.gesture.reset();
            self.state.bounds = self.surface.bounds();
            action = self.save_now();
        }
        self.hovered = false;
        self.needs_redraw = true;
        action
    }

    pub fn pointer_press(
        &mut self,
        button: PointerButton,
        pos: (f64, f64),
        now: Instant,
    ) -> Option<HostAction> {
        match button {
            PointerButton::Secondary => {
                if self.state.pinned {
                    return None;
                }
                self.open_menu(pos);
                None
            }
            PointerButton::Primary => {
                if self.menu.is_visible() {
                    let action = self.menu.action_at(pos);
                    self.menu.close();
                    self.needs_redraw = true;
                    return match action {
                        Some(action) => self.apply_menu_action(action, now),
                        None => None,
                    };
                }

                if self.hovered
                    && !self.state.pinned
                    && compositor::settings_rect(self.client_size()).contains(pos.0, pos.1)
                {
                    let rect = compositor::settings_rect(self.client_size());
                    self.open_menu((rect.x as f64, (rect.y + rect.height as i32) as f64));
                    return None;
                }

                let outcome = self.gesture.press(
                    pos,
                    self.state.bounds,
                    self.state.pinned,
                    self.state.rotation_mode,
                    self.state.rotation_angle(),
                );
                match outcome {
                    PressOutcome::NativeMove => self.surface.begin_move(pos),
                    PressOutcome::Resize(handle) => {
                        debug!("Resize started on {:?} handle", handle)
                    }
                    PressOutcome::Rotate => debug!("Rotation gesture started"),
                    PressOutcome::Ignored => {}
                }
                None
            }
        }
    }

    pub fn pointer_motion(&mut self, pos: (f64, f64), now: Instant) -> Option<HostAction> {
        if self.menu.is_visible() && self.menu.hover_at(pos) {
            self.needs_redraw = true;
        }

        match self.gesture.state() {
            Gesture::Dragging => {
                self.surface.move_drag(pos);
                self.state.bounds = self.surface.bounds();
                self.saver.note_change(now);
            }
            _ => match self.gesture.motion(pos, self.state.bounds) {
                MotionOutcome::Bounds(bounds) => {
                    self.state.bounds = bounds;
                    self.surface.set_bounds(bounds);
                    self.saver.note_change(now);
                    // Synchronous repaint while resizing to avoid visible lag.
                    self.render(now);
                }
                MotionOutcome::Rotation(angle) => {
                    self.state.set_rotation(angle);
                    self.saver.note_change(now);
                    self.needs_redraw = true;
                }
                MotionOutcome::None => {}
            },
        }
        None
    }

    pub fn pointer_release(&mut self, button: PointerButton) -> Option<HostAction> {
        if button != PointerButton::Primary {
            return None;
        }
        match self.gesture.release() {
            ReleaseOutcome::None => None,
            ReleaseOutcome::DragFinished => {
                self.state.bounds = self.surface.bounds();
                self.needs_redraw = true;
                self.save_now()
            }
            ReleaseOutcome::ResizeFinished => {
                // High-quality repaint replaces the fast-path frames.
                self.needs_redraw = true;
                self.save_now()
            }
            ReleaseOutcome::RotateFinished => self.save_now(),
        }
    }

    pub fn key(&mut self, command: KeyCommand) -> Option<HostAction> {
        match command {
            KeyCommand::ToggleRotationMode => self.toggle_rotation_mode(),
            KeyCommand::Minimize => {
                if !self.surface.request_minimize() {
                    debug!("Minimize rejected while pinned");
                }
                None
            }
            KeyCommand::Close => Some(HostAction::CloseWindow),
        }
    }

    pub fn apply_menu_action(&mut self, action: MenuAction, _now: Instant) -> Option<HostAction> {
        self.needs_redraw = true;
        match action {
            MenuAction::Close => Some(HostAction::CloseWindow),
            MenuAction::SetOpacity(percent) => {
                self.state.set_opacity(percent);
                self.save_now()
            }
            MenuAction::ToggleAlwaysOnTop => {
                self.state.always_on_top = !self.state.always_on_top;
                self.pin.apply(&self.state, &mut self.surface);
                self.save_now()
            }
            MenuAction::TogglePin => self.set_pinned(!self.state.pinned),
            MenuAction::FlipHorizontal => {
                self.state.flip_horizontal = !self.state.flip_horizontal;
                self.save_now()
            }
            MenuAction::FlipVertical => {
                self.state.flip_vertical = !self.state.flip_vertical;
                self.save_now()
            }
            MenuAction::ToggleRotationMode => self.toggle_rotation_mode(),
            MenuAction::ResetRotation => {
                self.state.set_rotation(0.0);
                self.save_now()
            }
            MenuAction::ResetSize => {
                if let Some(image) = &self.image {
                    self.state.bounds.width = image.width.max(MIN_SIZE);
                    self.state.bounds.height = image.height.max(MIN_SIZE);
                    self.surface.set_bounds(self.state.bounds);
                    return self.save_now();
                }
                None
            }
            MenuAction::ResetPosition => {
                self.state.bounds.x = DEFAULT_POSITION.0;
                self.state.bounds.y = DEFAULT_POSITION.1;
                self.surface.set_bounds(self.state.bounds);
                self.save_now()
            }
            MenuAction::RemoveFromLibrary => Some(HostAction::RemoveFromLibrary),
        }
    }

    /// Scroll-wheel opacity stepping; pinned windows receive no pointer input
    /// so no extra guard is needed here.
    pub fn adjust_opacity(&mut self, delta: i16) -> Option<HostAction> {
        let new = (self.state.opacity() as i16 + delta).clamp(0, 100) as u8;
        if new == self.state.opacity() {
            return None;
        }
        self.state.set_opacity(new);
        self.needs_redraw = true;
        self.save_now()
    }

    /// Rename is driven by the catalog; the overlay only records and saves.
    #[allow(dead_code)]
    pub fn apply_rename(&mut self, name: impl Into<String>) -> Option<HostAction> {
        self.display_name = name.into();
        self.save_now()
    }

    pub fn set_pinned(&mut self, pinned: bool) -> Option<HostAction> {
        // Applied even when the flag appears unchanged so the surface flags
        // can never drift out of sync.
        self.state.pinned = pinned;
        if pinned {
            self.hovered = false;
            self.menu.close();
            self.gesture.reset();
        }
        self.pin.apply(&self.state, &mut self.surface);
        self.needs_redraw = true;
        self.save_now()
    }

    pub fn toggle_pin(&mut self) -> Option<HostAction> {
        self.set_pinned(!self.state.pinned)
    }

    /// Let another window surface above a pinned sticker, and undo it.
    pub fn lower_temporarily(&mut self) {
        self.pin.lower_temporarily(&self.state, &mut self.surface);
    }

    pub fn restore_topmost(&mut self) {
        self.pin.restore(&self.state, &mut self.surface);
    }

    /// The compositor acknowledged a size; accept it unless a gesture owns
    /// the geometry right now.
    pub fn surface_configured(&mut self, size: (u32, u32), now: Instant) {
        if !self.gesture.is_active() && size.0 > 0 && size.1 > 0 {
            self.state.bounds.width = size.0;
            self.state.bounds.height = size.1;
        }
        self.needs_redraw = true;
        self.render(now);
    }

    /// Advance time-driven work: the fade ramp, the save debounce, and the
    /// throttled redraw.
    pub fn tick(&mut self, now: Instant) -> Option<HostAction> {
        let mut action = None;
        if self.saver.poll(now) && !self.transient {
            action = Some(HostAction::SaveLibrary);
        }
        if !self.fade.finished(now) {
            self.needs_redraw = true;
        }
        let due = self
            .last_draw
            .map_or(true, |last| now.duration_since(last) >= REDRAW_INTERVAL);
        if self.needs_redraw && due {
            self.render(now);
        }
        action
    }

    /// Flush pending persistence before teardown.
    pub fn close(&mut self) -> Option<HostAction> {
        self.gesture.reset();
        self.save_now()
    }

    fn toggle_rotation_mode(&mut self) -> Option<HostAction> {
        if self.state.pinned {
            return None;
        }
        // An in-progress gesture keeps its interpretation until pointer-up.
        if self.gesture.is_active() {
            return None;
        }
        self.state.rotation_mode = !self.state.rotation_mode;
        self.needs_redraw = true;
        self.save_now()
    }

    fn open_menu(&mut self, pos: (f64, f64)) {
        self.menu.open(pos, self.client_size(), &self.state);
        self.needs_redraw = true;
    }

    fn client_size(&self) -> (u32, u32) {
        (self.state.bounds.width, self.state.bounds.height)
    }

    /// Immediate save: cancels the debounce and asks the host to persist.
    fn save_now(&mut self) -> Option<HostAction> {
        self.saver.flush();
        (!self.transient).then_some(HostAction::SaveLibrary)
    }

    fn render(&mut self, now: Instant) {
        if self.surface.is_hidden() {
            return;
        }
        let alpha = self.fade.alpha(now) * self.state.opacity() as f32 / 100.0;
        let quality = if self.gesture.is_resizing() {
            Quality::Fast
        } else {
            Quality::High
        };

        let Self {
            ref mut surface,
            ref state,
            ref image,
            ref menu,
            ref hovered,
            ..
        } = *self;
        let params = FrameParams {
            image: image.as_ref(),
            state,
            alpha,
            hovered: *hovered,
            quality,
            menu,
        };
        let mut draw =
            |canvas: &mut [u8], width: u32, height: u32| {
                compositor::render_frame(canvas, width, height, &params)
            };
        surface.present(&mut draw);

        self.needs_redraw = false;
        self.last_draw = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fade::FADE_DURATION;
    use crate::gesture::{handle_rect, Handle};
    use crate::persist::QUIET_PERIOD;
    use crate::transform::Rect;

    /// Surface fake: records flags and simulates native moves on its bounds.
    #[derive(Default)]
    struct FakeSurface {
        bounds: Rect,
        on_top: bool,
        click_through: bool,
        pin_guard: bool,
        hidden: bool,
        move_grab: Option<(f64, f64)>,
        move_origin: (i32, i32),
        presents: u32,
    }

    impl WindowSurface for FakeSurface {
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
        fn begin_move(&mut self, pointer: (f64, f64)) {
            self.move_grab = Some(pointer);
            self.move_origin = (self.bounds.x, self.bounds.y);
        }
        fn move_drag(&mut self, pointer: (f64, f64)) {
            if let Some(grab) = self.move_grab {
                self.bounds.x = self.move_origin.0 + (pointer.0 - grab.0) as i32;
                self.bounds.y = self.move_origin.1 + (pointer.1 - grab.1) as i32;
            }
        }
        fn request_hide(&mut self) -> bool {
            if self.pin_guard {
                return false;
            }
            self.hidden = true;
            true
        }
        fn request_minimize(&mut self) -> bool {
            // Converted straight back to the normal state; only the pin guard
            // makes the refusal observable.
            !self.pin_guard
        }
        fn show(&mut self) {
            self.hidden = false;
        }
        fn is_hidden(&self) -> bool {
            self.hidden
        }
        fn present(&mut self, draw: &mut dyn FnMut(&mut [u8], u32, u32)) {
            let (w, h) = (self.bounds.width.max(1), self.bounds.height.max(1));
            let mut canvas = vec![0u8; (w * h * 4) as usize];
            draw(&mut canvas, w, h);
            self.presents += 1;
        }
    }

    fn window() -> (StickerWindow<FakeSurface>, Instant) {
        let item = ImageItem::new("cat", "/tmp/cat.png");
        let now = Instant::now();
        let win = StickerWindow::new(&item, FakeSurface::default(), false, now);
        (win, now)
    }

    fn press_resize(win: &mut StickerWindow<FakeSurface>, now: Instant) {
        let rect = handle_rect(Handle::BottomRight, (300, 300));
        let pos = (rect.x as f64 + 3.0, rect.y as f64 + 3.0);
        assert_eq!(win.pointer_press(PointerButton::Primary, pos, now), None);
        assert!(win.gesture.is_resizing());
    }

    #[test]
    fn test_new_window_applies_saved_state() {
        let (win, _) = window();
        assert_eq!(win.surface().bounds(), Rect::new(100, 100, 300, 300));
        assert!(win.surface().on_top);
        assert!(!win.surface().click_through);
    }

    #[test]
    fn test_drag_roundtrip() {
        let (mut win, now) = window();
        win.pointer_press(PointerButton::Primary, (150.0, 150.0), now);
        assert!(win.surface().move_grab.is_some());

        win.pointer_motion((170.0, 145.0), now);
        assert_eq!(win.surface().bounds().x, 120);
        assert_eq!(win.surface().bounds().y, 95);

        let action = win.pointer_release(PointerButton::Primary);
        assert_eq!(action, Some(HostAction::SaveLibrary));
        assert_eq!(win.state().bounds.x, 120);
    }

    #[test]
    fn test_resize_renders_synchronously_and_saves_on_release() {
        let (mut win, now) = window();
        press_resize(&mut win, now);

        let before = win.surface().presents;
        win.pointer_motion((350.0, 360.0), now);
        assert!(win.surface().presents > before);
        assert_eq!(win.state().bounds.width, 354);
        assert_eq!(win.state().bounds.height, 364);

        assert_eq!(
            win.pointer_release(PointerButton::Primary),
            Some(HostAction::SaveLibrary)
        );
    }

    #[test]
    fn test_rotation_gesture_updates_angle() {
        let (mut win, now) = window();
        win.state.rotation_mode = true;
        // Grab right of center, move below center: +90 degrees.
        win.pointer_press(PointerButton::Primary, (300.0, 150.0), now);
        win.pointer_motion((150.0, 300.0), now);
        assert!((win.state().rotation_angle() - 90.0).abs() < 0.1);
        assert_eq!(
            win.pointer_release(PointerButton::Primary),
            Some(HostAction::SaveLibrary)
        );
    }

    #[test]
    fn test_pinned_window_is_inert() {
        let (mut win, now) = window();
        win.set_pinned(true);
        let bounds = win.state().bounds;

        win.pointer_enter();
        assert!(!win.hovered);
        assert_eq!(win.pointer_press(PointerButton::Primary, (150.0, 150.0), now), None);
        win.pointer_motion((250.0, 250.0), now);
        assert_eq!(win.state().bounds, bounds);
        assert_eq!(win.state().rotation_angle(), 0.0);

        // Menu stays closed, hide and minimize bounce.
        assert_eq!(win.pointer_press(PointerButton::Secondary, (150.0, 150.0), now), None);
        assert!(!win.menu.is_visible());
        assert_eq!(win.key(KeyCommand::Minimize), None);
        assert!(!win.surface().is_hidden());
        assert_eq!(win.key(KeyCommand::ToggleRotationMode), None);
        assert!(!win.state().rotation_mode);
    }

    #[test]
    fn test_pin_toggle_sets_flags_and_saves() {
        let (mut win, _) = window();
        win.state.always_on_top = false;
        assert_eq!(win.toggle_pin(), Some(HostAction::SaveLibrary));
        assert!(win.surface().click_through);
        assert!(win.surface().on_top);

        assert_eq!(win.toggle_pin(), Some(HostAction::SaveLibrary));
        assert!(!win.surface().click_through);
        assert!(!win.surface().on_top);
    }

    #[test]
    fn test_pin_clears_hover_and_gesture() {
        let (mut win, now) = window();
        win.pointer_enter();
        press_resize(&mut win, now);
        win.set_pinned(true);
        assert!(!win.hovered);
        assert!(!win.gesture.is_active());
    }

    #[test]
    fn test_debounced_save_fires_once_after_quiet_period() {
        let (mut win, now) = window();
        press_resize(&mut win, now);

        let mut t = now;
        for i in 1..=5 {
            t = now + Duration::from_millis(i * 50);
            win.pointer_motion((240.0 + i as f64, 250.0), t);
        }

        assert_eq!(win.tick(t + QUIET_PERIOD - Duration::from_millis(1)), None);
        assert_eq!(
            win.tick(t + QUIET_PERIOD),
            Some(HostAction::SaveLibrary)
        );
        assert_eq!(win.tick(t + QUIET_PERIOD * 2), None);
    }

    #[test]
    fn test_release_preempts_debounce() {
        let (mut win, now) = window();
        press_resize(&mut win, now);
        win.pointer_motion((250.0, 250.0), now);
        assert_eq!(
            win.pointer_release(PointerButton::Primary),
            Some(HostAction::SaveLibrary)
        );
        // The pending debounce was flushed with it.
        assert_eq!(win.tick(now + QUIET_PERIOD * 2), None);
    }

    #[test]
    fn test_menu_flow() {
        let (mut win, now) = window();
        win.pointer_press(PointerButton::Secondary, (50.0, 50.0), now);
        assert!(win.menu.is_visible());

        // Second row is "Opacity 100%"; pick "Opacity 90%" on the third.
        let pos = win.menu.pos();
        let item_pos = (
            pos.0 as f64 + 10.0,
            pos.1 as f64 + crate::menu::MENU_ITEM_HEIGHT as f64 * 2.5,
        );
        let action = win.pointer_press(PointerButton::Primary, item_pos, now);
        assert_eq!(action, Some(HostAction::SaveLibrary));
        assert_eq!(win.state().opacity(), 90);
        assert!(!win.menu.is_visible());
    }

    #[test]
    fn test_menu_click_outside_closes() {
        let (mut win, now) = window();
        win.pointer_press(PointerButton::Secondary, (50.0, 50.0), now);
        let below = win.menu.pos().1 as f64 + win.menu.height() as f64 + 5.0;
        assert_eq!(
            win.pointer_press(PointerButton::Primary, (260.0, below.min(299.0)), now),
            None
        );
        assert!(!win.menu.is_visible());
    }

    #[test]
    fn test_rotation_mode_toggle_deferred_during_gesture() {
        let (mut win, now) = window();
        press_resize(&mut win, now);
        assert_eq!(win.key(KeyCommand::ToggleRotationMode), None);
        assert!(!win.state().rotation_mode);

        win.pointer_release(PointerButton::Primary);
        assert_eq!(
            win.key(KeyCommand::ToggleRotationMode),
            Some(HostAction::SaveLibrary)
        );
        assert!(win.state().rotation_mode);
    }

    #[test]
    fn test_transient_window_never_requests_saves() {
        let item = ImageItem::new("piped", "<stdin>");
        let now = Instant::now();
        let mut win = StickerWindow::new(&item, FakeSurface::default(), true, now);

        win.pointer_press(PointerButton::Primary, (150.0, 150.0), now);
        win.pointer_motion((200.0, 200.0), now);
        assert_eq!(win.pointer_release(PointerButton::Primary), None);
        assert_eq!(win.toggle_pin(), None);
        assert_eq!(win.tick(now + QUIET_PERIOD * 2), None);
        assert_eq!(win.close(), None);
    }

    #[test]
    fn test_close_flushes_pending_save() {
        let (mut win, now) = window();
        press_resize(&mut win, now);
        win.pointer_motion((250.0, 250.0), now);
        assert_eq!(win.close(), Some(HostAction::SaveLibrary));
        assert_eq!(win.tick(now + QUIET_PERIOD * 2), None);
    }

    #[test]
    fn test_sync_item_skips_geometry_while_hidden() {
        let (mut win, _) = window();
        win.state.bounds = Rect::new(11, 22, 333, 444);
        win.state.set_opacity(70);

        let mut item = ImageItem::new("cat", "/tmp/cat.png");
        win.surface.hidden = true;
        win.sync_item(&mut item);
        assert_eq!(item.last_x, None);
        assert_eq!(item.opacity, 70);
        assert!(item.last_used.is_none());

        win.surface.hidden = false;
        win.sync_item(&mut item);
        assert_eq!(item.last_x, Some(11));
        assert_eq!(item.last_height, Some(444));
        assert!(item.last_used.is_some());
    }

    #[test]
    fn test_fade_completion_reaches_persisted_opacity() {
        let (mut win, now) = window();
        win.state.set_opacity(70);
        // Mid-fade the effective alpha is below the persisted opacity.
        let mid = now + FADE_DURATION / 2;
        assert!(win.fade.alpha(mid) < 1.0);
        // After the ramp the alpha factor is exactly 1.
        let done = now + FADE_DURATION * 2;
        assert_eq!(win.fade.alpha(done), 1.0);
        win.tick(done);
        assert!(win.surface().presents > 0);
    }

    #[test]
    fn test_reset_size_and_position() {
        let (mut win, now) = window();
        win.set_image(
            ImageData {
                width: 640,
                height: 480,
                bgra: vec![0; 640 * 480 * 4],
                mipmaps: Vec::new(),
            },
            now,
        );
        win.state.bounds = Rect::new(50, 60, 200, 200);

        assert_eq!(
            win.apply_menu_action(MenuAction::ResetSize, now),
            Some(HostAction::SaveLibrary)
        );
        assert_eq!(win.state().bounds.width, 640);
        assert_eq!(win.state().bounds.height, 480);

        assert_eq!(
            win.apply_menu_action(MenuAction::ResetPosition, now),
            Some(HostAction::SaveLibrary)
        );
        assert_eq!(win.state().bounds.x, DEFAULT_POSITION.0);
        assert_eq!(win.state().bounds.y, DEFAULT_POSITION.1);
    }

    #[test]
    fn test_rename_saves_immediately() {
        let (mut win, now) = window();
        press_resize(&mut win, now);
        win.pointer_motion((350.0, 350.0), now);
        assert_eq!(win.apply_rename("tiger"), Some(HostAction::SaveLibrary));
        assert_eq!(win.display_name(), "tiger");
        // The rename flushed the pending geometry debounce with it.
        assert_eq!(win.tick(now + QUIET_PERIOD * 2), None);
    }

    #[test]
    fn test_remove_from_library_is_delegated() {
        let (mut win, now) = window();
        assert_eq!(
            win.apply_menu_action(MenuAction::RemoveFromLibrary, now),
            Some(HostAction::RemoveFromLibrary)
        );
    }

    #[test]
    fn test_lower_and_restore_roundtrip() {
        let (mut win, _) = window();
        win.set_pinned(true);
        assert!(win.surface().on_top);
        win.lower_temporarily();
        assert!(!win.surface().on_top);
        win.restore_topmost();
        assert!(win.surface().on_top);
    }
}
