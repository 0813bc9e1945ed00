// Gesture tracking
// Explicit state machine for drag, resize and rotate interactions

use crate::transform::{normalize_angle, Rect, MIN_SIZE};

/// Side length of the square resize handles.
pub const HANDLE_SIZE: u32 = 7;

/// The eight resize handles: four corners, four edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

pub const ALL_HANDLES: [Handle; 8] = [
    Handle::TopLeft,
    Handle::TopRight,
    Handle::BottomLeft,
    Handle::BottomRight,
    Handle::Top,
    Handle::Bottom,
    Handle::Left,
    Handle::Right,
];

/// Handle square in client coordinates.
pub fn handle_rect(handle: Handle, client: (u32, u32)) -> Rect {
    let (w, h) = (client.0 as i32, client.1 as i32);
    let s = HANDLE_SIZE;
    let si = s as i32;
    match handle {
        Handle::TopLeft => Rect::new(0, 0, s, s),
        Handle::TopRight => Rect::new(w - si, 0, s, s),
        Handle::BottomLeft => Rect::new(0, h - si, s, s),
        Handle::BottomRight => Rect::new(w - si, h - si, s, s),
        Handle::Top => Rect::new(w / 2 - si / 2, 0, s, s),
        Handle::Bottom => Rect::new(w / 2 - si / 2, h - si, s, s),
        Handle::Left => Rect::new(0, h / 2 - si / 2, s, s),
        Handle::Right => Rect::new(w - si, h / 2 - si / 2, s, s),
    }
}

/// Which handle, if any, the pointer is over.
pub fn hit_test_handle(client: (u32, u32), pos: (f64, f64)) -> Option<Handle> {
    ALL_HANDLES
        .into_iter()
        .find(|&handle| handle_rect(handle, client).contains(pos.0, pos.1))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    /// Movement is delegated to the window surface's native move.
    Dragging,
    Resizing(Handle),
    Rotating {
        /// Rotation angle when the gesture started.
        baseline: f32,
        /// Pointer angle (degrees) around the window center at press time.
        grab_angle: f64,
    },
}

/// What a button press turned into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressOutcome {
    /// Pinned, or a gesture is already in progress.
    Ignored,
    NativeMove,
    Resize(Handle),
    Rotate,
}

/// What a pointer motion sample produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionOutcome {
    None,
    Bounds(Rect),
    Rotation(f32),
}

/// The gesture that just ended, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    None,
    DragFinished,
    ResizeFinished,
    RotateFinished,
}

#[derive(Debug)]
pub struct GestureTracker {
    state: Gesture,
    /// Pointer position at the last applied resize step; deltas are taken
    /// against this and it advances only when a step is accepted.
    last_sample: (f64, f64),
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureTracker {
    pub fn new() -> Self {
        Self {
            state: Gesture::Idle,
            last_sample: (0.0, 0.0),
        }
    }

    pub fn state(&self) -> Gesture {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != Gesture::Idle
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, Gesture::Resizing(_))
    }

    /// Primary button pressed at `pos` (client coordinates).
    pub fn press(
        &mut self,
        pos: (f64, f64),
        bounds: Rect,
        pinned: bool,
        rotation_mode: bool,
        current_angle: f32,
    ) -> PressOutcome {
        if pinned || self.state != Gesture::Idle {
            return PressOutcome::Ignored;
        }

        if rotation_mode {
            let center = (bounds.width as f64 / 2.0, bounds.height as f64 / 2.0);
            let grab_angle = pointer_angle(pos, center);
            self.state = Gesture::Rotating {
                baseline: current_angle,
                grab_angle,
            };
            return PressOutcome::Rotate;
        }

        match hit_test_handle((bounds.width, bounds.height), pos) {
            Some(handle) => {
                self.state = Gesture::Resizing(handle);
                self.last_sample = pos;
                PressOutcome::Resize(handle)
            }
            None => {
                self.state = Gesture::Dragging;
                PressOutcome::NativeMove
            }
        }
    }

    /// Pointer moved to `pos` while a button may be held.
    pub fn motion(&mut self, pos: (f64, f64), bounds: Rect) -> MotionOutcome {
        match self.state {
            Gesture::Idle | Gesture::Dragging => MotionOutcome::None,
            Gesture::Resizing(handle) => {
                let dx = (pos.0 - self.last_sample.0) as i32;
                let dy = (pos.1 - self.last_sample.1) as i32;
                match resize_bounds(bounds, handle, dx, dy) {
                    Some(new_bounds) => {
                        self.last_sample = pos;
                        MotionOutcome::Bounds(new_bounds)
                    }
                    // Below minimum size: skip this sample, keep the gesture.
                    None => MotionOutcome::None,
                }
            }
            Gesture::Rotating {
                baseline,
                grab_angle,
            } => {
                let center = (bounds.width as f64 / 2.0, bounds.height as f64 / 2.0);
                let delta = pointer_angle(pos, center) - grab_angle;
                MotionOutcome::Rotation(normalize_angle(baseline + delta as f32))
            }
        }
    }

    /// Primary button released.
    pub fn release(&mut self) -> ReleaseOutcome {
        let outcome = match self.state {
            Gesture::Idle => ReleaseOutcome::None,
            Gesture::Dragging => ReleaseOutcome::DragFinished,
            Gesture::Resizing(_) => ReleaseOutcome::ResizeFinished,
            Gesture::Rotating { .. } => ReleaseOutcome::RotateFinished,
        };
        self.state = Gesture::Idle;
        outcome
    }

    /// Abandon any gesture without reporting completion.
    pub fn reset(&mut self) {
        self.state = Gesture::Idle;
    }
}

/// Angle of `pos` around `center`, in degrees.
fn pointer_angle(pos: (f64, f64), center: (f64, f64)) -> f64 {
    (pos.1 - center.1).atan2(pos.0 - center.0).to_degrees()
}

/// New bounds for a resize step, or None when either dimension would fall
/// below the minimum.
fn resize_bounds(bounds: Rect, handle: Handle, dx: i32, dy: i32) -> Option<Rect> {
    let Rect {
        mut x,
        mut y,
        width,
        height,
    } = bounds;
    let mut w = width as i32;
    let mut h = height as i32;

    match handle {
        Handle::TopLeft => {
            x += dx;
            y += dy;
            w -= dx;
            h -= dy;
        }
        Handle::TopRight => {
            y += dy;
            w += dx;
            h -= dy;
        }
        Handle::BottomLeft => {
            x += dx;
            w -= dx;
            h += dy;
        }
        Handle::BottomRight => {
            w += dx;
            h += dy;
        }
        Handle::Top => {
            y += dy;
            h -= dy;
        }
        Handle::Bottom => {
            h += dy;
        }
        Handle::Left => {
            x += dx;
            w -= dx;
        }
        Handle::Right => {
            w += dx;
        }
    }

    if w < MIN_SIZE as i32 || h < MIN_SIZE as i32 {
        return None;
    }
    Some(Rect::new(x, y, w as u32, h as u32))
}
