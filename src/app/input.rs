//! Keyboard shortcuts

use crate::page::Page;

/// `id` of the passage search field
pub const SEARCH_INPUT_ID: &str = "passageSearch";
/// `id` of the collapsible navigation menu
pub const NAV_MENU_ID: &str = "navMenu";
/// Class marking the navigation menu as open
pub const MENU_OPEN_CLASS: &str = "active";

/// A key press as delivered by the host
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPress {
    /// Key value, e.g. `"k"` or `"Escape"`
    pub key: String,
    pub ctrl: bool,
    /// Cmd on macOS
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string(), ..Default::default() }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }
}

/// Site-wide shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl/Cmd + K
    FocusSearch,
    /// Escape
    CloseMenu,
}

impl Shortcut {
    /// Map a key press to a shortcut
    pub fn from_key(key: &KeyPress) -> Option<Self> {
        if (key.ctrl || key.meta) && key.key == "k" {
            return Some(Shortcut::FocusSearch);
        }
        if key.key == "Escape" {
            return Some(Shortcut::CloseMenu);
        }
        None
    }

    /// Whether the browser's default action should be suppressed
    pub fn prevents_default(&self) -> bool {
        matches!(self, Shortcut::FocusSearch)
    }
}

/// Handle a key press; returns true if the default action should be suppressed
pub fn handle_key<P: Page + ?Sized>(page: &mut P, key: &KeyPress) -> bool {
    let Some(shortcut) = Shortcut::from_key(key) else {
        return false;
    };

    match shortcut {
        Shortcut::FocusSearch => {
            if let Some(search) = page.element_by_id(SEARCH_INPUT_ID) {
                page.focus(search);
            }
        }
        Shortcut::CloseMenu => {
            if let Some(menu) = page.element_by_id(NAV_MENU_ID) {
                if page.has_class(menu, MENU_OPEN_CLASS) {
                    page.remove_class(menu, MENU_OPEN_CLASS);
                }
            }
        }
    }

    shortcut.prevents_default()
}
