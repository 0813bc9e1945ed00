// Context menu
// Item list, hit testing and placement for the in-window menu

use crate::transform::StickerState;

pub const MENU_WIDTH: u32 = 180;
pub const MENU_ITEM_HEIGHT: u32 = 25;

/// Opacity choices offered by the menu; persisted values outside this set are
/// kept as-is and simply show no check mark.
pub const OPACITY_PRESETS: [u8; 5] = [100, 90, 80, 70, 50];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Close,
    SetOpacity(u8),
    ToggleAlwaysOnTop,
    TogglePin,
    FlipHorizontal,
    FlipVertical,
    ToggleRotationMode,
    ResetRotation,
    ResetSize,
    ResetPosition,
    RemoveFromLibrary,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
    pub checked: bool,
}

/// The menu is rebuilt from sticker state every time it opens, so labels and
/// check marks always reflect the current state.
#[derive(Debug, Default)]
pub struct ContextMenu {
    visible: bool,
    pos: (i32, i32),
    hover: Option<usize>,
    items: Vec<MenuItem>,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, pos: (f64, f64), client: (u32, u32), state: &StickerState) {
        self.items = build_items(state);
        self.pos = clamp_position(
            (pos.0 as i32, pos.1 as i32),
            client,
            self.items.len() as u32,
        );
        self.hover = None;
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.hover = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn pos(&self) -> (i32, i32) {
        self.pos
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    pub fn height(&self) -> u32 {
        self.items.len() as u32 * MENU_ITEM_HEIGHT
    }

    /// Update the hovered item; returns true when it changed.
    pub fn hover_at(&mut self, pos: (f64, f64)) -> bool {
        let prev = self.hover;
        self.hover = self.item_at(pos);
        prev != self.hover
    }

    pub fn item_at(&self, pos: (f64, f64)) -> Option<usize> {
        if !self.visible {
            return None;
        }
        let (x, y) = (pos.0 - self.pos.0 as f64, pos.1 - self.pos.1 as f64);
        if x < 0.0 || x >= MENU_WIDTH as f64 || y < 0.0 || y >= self.height() as f64 {
            return None;
        }
        let index = (y / MENU_ITEM_HEIGHT as f64) as usize;
        (index < self.items.len()).then_some(index)
    }

    pub fn action_at(&self, pos: (f64, f64)) -> Option<MenuAction> {
        self.item_at(pos).map(|i| self.items[i].action)
    }
}

fn build_items(state: &StickerState) -> Vec<MenuItem> {
    let mut items = vec![MenuItem {
        label: "Close".into(),
        action: MenuAction::Close,
        checked: false,
    }];

    for value in OPACITY_PRESETS {
        items.push(MenuItem {
            label: format!("Opacity {}%", value),
            action: MenuAction::SetOpacity(value),
            checked: state.opacity() == value,
        });
    }

    items.push(MenuItem {
        label: "Always on Top".into(),
        action: MenuAction::ToggleAlwaysOnTop,
        checked: state.always_on_top,
    });
    items.push(MenuItem {
        label: if state.pinned { "Unpin" } else { "Pin" }.into(),
        action: MenuAction::TogglePin,
        checked: false,
    });
    items.push(MenuItem {
        label: "Flip Horizontal".into(),
        action: MenuAction::FlipHorizontal,
        checked: state.flip_horizontal,
    });
    items.push(MenuItem {
        label: "Flip Vertical".into(),
        action: MenuAction::FlipVertical,
        checked: state.flip_vertical,
    });
    items.push(MenuItem {
        label: "Rotation Mode (R)".into(),
        action: MenuAction::ToggleRotationMode,
        checked: state.rotation_mode,
    });
    items.push(MenuItem {
        label: "Reset Rotation".into(),
        action: MenuAction::ResetRotation,
        checked: false,
    });
    items.push(MenuItem {
        label: "Reset Size".into(),
        action: MenuAction::ResetSize,
        checked: false,
    });
    items.push(MenuItem {
        label: "Reset Position".into(),
        action: MenuAction::ResetPosition,
        checked: false,
    });
    items.push(MenuItem {
        label: "Remove from Library".into(),
        action: MenuAction::RemoveFromLibrary,
        checked: false,
    });
    items
}

/// Keep the menu inside the window where possible.
fn clamp_position(pos: (i32, i32), client: (u32, u32), item_count: u32) -> (i32, i32) {
    let height = (item_count * MENU_ITEM_HEIGHT) as i32;
    let mut x = pos.0;
    let mut y = pos.1;
    if x + MENU_WIDTH as i32 > client.0 as i32 {
        x = client.0 as i32 - MENU_WIDTH as i32;
    }
    if y + height > client.1 as i32 {
        y = client.1 as i32 - height;
    }
    (x.max(0), y.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageItem;

    fn state() -> StickerState {
        StickerState::from_item(&ImageItem::new("x", "/x.png"))
    }

    #[test]
    fn test_open_builds_items_from_state() {
        let mut s = state();
        s.set_opacity(70);
        s.pinned = true;
        s.flip_vertical = true;

        let mut menu = ContextMenu::new();
        menu.open((10.0, 10.0), (500, 500), &s);
        assert!(menu.is_visible());

        let checked: Vec<&str> = menu
            .items()
            .iter()
            .filter(|i| i.checked)
            .map(|i| i.label.as_str())
            .collect();
        assert_eq!(checked, ["Opacity 70%", "Always on Top", "Flip Vertical"]);

        let unpin = menu
            .items()
            .iter()
            .find(|i| i.action == MenuAction::TogglePin)
            .unwrap();
        assert_eq!(unpin.label, "Unpin");
    }

    #[test]
    fn test_hit_testing() {
        let mut menu = ContextMenu::new();
        menu.open((100.0, 50.0), (1000, 1000), &state());

        assert_eq!(menu.item_at((99.0, 60.0)), None);
        assert_eq!(menu.item_at((110.0, 55.0)), Some(0));
        assert_eq!(
            menu.item_at((110.0, 50.0 + MENU_ITEM_HEIGHT as f64 * 1.5)),
            Some(1)
        );
        assert_eq!(
            menu.action_at((110.0, 50.0 + MENU_ITEM_HEIGHT as f64 * 1.5)),
            Some(MenuAction::SetOpacity(100))
        );
        let below = 50.0 + menu.height() as f64 + 1.0;
        assert_eq!(menu.item_at((110.0, below)), None);
    }

    #[test]
    fn test_hidden_menu_never_hits() {
        let mut menu = ContextMenu::new();
        menu.open((0.0, 0.0), (1000, 1000), &state());
        menu.close();
        assert_eq!(menu.item_at((5.0, 5.0)), None);
    }

    #[test]
    fn test_position_clamped_to_window() {
        let mut menu = ContextMenu::new();
        menu.open((990.0, 990.0), (1000, 1000), &state());
        let (x, y) = menu.pos();
        assert!(x + MENU_WIDTH as i32 <= 1000);
        assert!(y + menu.height() as i32 <= 1000);

        // A window smaller than the menu pins it to the origin.
        menu.open((40.0, 40.0), (50, 50), &state());
        assert_eq!(menu.pos(), (0, 0));
    }

    #[test]
    fn test_hover_tracking() {
        let mut menu = ContextMenu::new();
        menu.open((0.0, 0.0), (1000, 1000), &state());
        assert!(menu.hover_at((10.0, 5.0)));
        assert_eq!(menu.hover(), Some(0));
        assert!(!menu.hover_at((12.0, 6.0)));
        assert!(menu.hover_at((10.0, MENU_ITEM_HEIGHT as f64 + 1.0)));
        assert_eq!(menu.hover(), Some(1));
    }
}
