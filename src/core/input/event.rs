//=========================================================================
// Input Event Types
//
// Platform-independent pointer and keyboard events.
//
// Responsibilities:
// - Represent the buttons and keys the session reacts to
// - Provide equality and hashing semantics for deduplication
// - Enable event coalescing (multiple MouseMoved → last position)
//
// Coordinates:
// `MouseMoved` carries render-surface coordinates (640×360, top-left
// origin). The platform layer scales physical cursor positions before
// the event is created.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputRouter → windows, property editor, session signals
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Drags and resizes windows; skips the cinematic.
    Left,

    /// Selects an object for the property editor.
    Right,

    Middle,

    /// Side buttons and anything else.
    Other,
}

//=== KeyCode =============================================================

/// Physical keys the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Cinematic Skip ---------------------------------------------------
    Space,
    Enter,
    Escape,

    //--- Property Editor --------------------------------------------------
    Backspace,
    Delete,

    /// Any key not listed above.
    Unidentified,
}

impl KeyCode {
    /// Keys that skip the boot cinematic.
    pub fn skips_cinematic(&self) -> bool {
        matches!(self, Self::Space | Self::Enter | Self::Escape)
    }

    /// Keys that delete the property editor's selection.
    pub fn deletes_selection(&self) -> bool {
        matches!(self, Self::Delete | Self::Backspace)
    }
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// # Equality & Hashing Semantics
///
/// Events compare by type + payload (key/button + modifiers), except
/// `MouseMoved`, which compares equal regardless of coordinates so a
/// set keeps only the latest position.
///
/// ```text
/// KeyDown{Space, NONE}  == KeyDown{Space, NONE}    ✓
/// KeyDown{Space, NONE}  == KeyDown{Space, SHIFT}   ✗
/// MouseMoved{...}       == MouseMoved{...}         ✓
/// ```
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
    },

    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Cursor moved, in render-surface coordinates.
    MouseMoved { x: f32, y: f32 },

    /// Unrecognized platform event; ignored.
    Unidentified,
}

impl InputEvent {
    /// Continuous events are coalesced per batch; discrete ones are kept
    /// in order.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MouseMoved { .. })
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a, modifiers: ma }, KeyDown { key: b, modifiers: mb })
            | (KeyUp { key: a, modifiers: ma }, KeyUp { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (
                MouseButtonDown { button: a, modifiers: ma },
                MouseButtonDown { button: b, modifiers: mb },
            )
            | (
                MouseButtonUp { button: a, modifiers: ma },
                MouseButtonUp { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Consistent with `PartialEq`: coordinates are not hashed.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown { key, modifiers } | Self::KeyUp { key, modifiers } => {
                key.hash(state);
                modifiers.hash(state);
            }
            Self::MouseButtonDown { button, modifiers }
            | Self::MouseButtonUp { button, modifiers } => {
                button.hash(state);
                modifiers.hash(state);
            }
            Self::MouseMoved { .. } | Self::Unidentified => {}
        }
    }
}

//=== Modifiers ===========================================================

/// Modifier key state. Left and right variants are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
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

//=========================================================================
// Unit Tests
//=========================================================================
