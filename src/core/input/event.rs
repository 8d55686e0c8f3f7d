//=========================================================================
// Input Event Types
//
// Platform-neutral representation of the raw input the viewer reacts to.
//
// The platform layer translates windowing events into these; the viewer
// resolves them to actions through the `ActionMapper` (keys) or the
// chrome layout (clicks).
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    ActionMapper / ChromeLayout
//         ↓
//    ViewerAction
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,

    /// Side buttons and anything else the platform reports.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier (location, not character).
///
/// Only keys the viewer binds are listed; the rest arrive as
/// `Unidentified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 1-9
    Digit1, Digit2, Digit3, Digit4, Digit5,
    Digit6, Digit7, Digit8, Digit9,

    Escape,

    /// Any key the platform layer does not map.
    Unidentified,
}

impl KeyCode {
    /// Number-row keys 1..9 in order; index `i` selects menu entry `i`.
    pub const MENU_DIGITS: [KeyCode; 9] = [
        KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3,
        KeyCode::Digit4, KeyCode::Digit5, KeyCode::Digit6,
        KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
    ];
}

//=== Modifiers ===========================================================

/// Modifier key state. Left and right variants are not distinguished.
///
/// Bindings match modifiers exactly: a binding for `1` does not fire on
/// `Ctrl+1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,

    /// Ctrl, or Command on macOS.
    pub ctrl: bool,

    /// Alt, or Option on macOS.
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Mouse button pressed at cursor position `(x, y)`.
    ///
    /// Coordinates are logical pixels, top-left origin.
    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
        x: f32,
        y: f32,
    },

    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Cursor moved. Logical pixels, top-left origin.
    MouseMoved { x: f32, y: f32 },
}

impl InputEvent {
    /// Plain key press with no modifiers held.
    pub fn key(key: KeyCode) -> Self {
        Self::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Plain left click at `(x, y)`.
    pub fn click(x: f32, y: f32) -> Self {
        Self::MouseButtonDown {
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
            x,
            y,
        }
    }

    /// Returns a new event with updated modifiers (consumes self).
    ///
    /// No effect on `MouseMoved`.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        match &mut self {
            Self::KeyDown { modifiers: m, .. }
            | Self::KeyUp { modifiers: m, .. }
            | Self::MouseButtonDown { modifiers: m, .. }
            | Self::MouseButtonUp { modifiers: m, .. } => {
                *m = modifiers;
            }
            _ => {}
        }
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
