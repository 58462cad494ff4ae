//! Keyboard chords that trigger window-manager operations.

/// Modifier keys held while a key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyModifiers {
    pub const ALT: Self = Self {
        alt: true,
        ctrl: false,
        meta: false,
    };
    pub const META: Self = Self {
        alt: false,
        ctrl: false,
        meta: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Bring the bottom-most window to front.
    CycleFocus,
    /// Minimize every visible window.
    ShowDesktop,
    CloseActive,
    MinimizeActive,
    ToggleMaximizeActive,
}

/// Maps a `KeyboardEvent.key` value plus modifiers to a shortcut, if any.
pub fn shortcut_for_key(key: &str, modifiers: KeyModifiers) -> Option<ShortcutAction> {
    if modifiers.ctrl {
        return None;
    }
    match (modifiers.alt, modifiers.meta) {
        (true, false) => match key {
            "`" => Some(ShortcutAction::CycleFocus),
            "F4" => Some(ShortcutAction::CloseActive),
            "ArrowDown" => Some(ShortcutAction::MinimizeActive),
            "ArrowUp" => Some(ShortcutAction::ToggleMaximizeActive),
            _ => None,
        },
        (false, true) if key.eq_ignore_ascii_case("d") => Some(ShortcutAction::ShowDesktop),
        _ => None,
    }
}
