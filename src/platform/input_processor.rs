//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit window events into session InputEvents.
//
// Architecture:
//   WindowEvent → InputProcessor → InputEvent → InputBuffer
//
// Modifier state from ModifiersChanged is cached and stamped on every
// following key or button event. Keys the session ignores are dropped.
// Cursor positions are scaled from the host window's physical size to
// the 640×360 render surface.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::geometry::{RENDER_HEIGHT, RENDER_WIDTH};
use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    modifiers: Modifiers,

    /// Physical inner size of the host window.
    surface: (f32, f32),
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self {
            modifiers: Modifiers::NONE,
            surface: (RENDER_WIDTH, RENDER_HEIGHT),
        }
    }

    //--- Host State -------------------------------------------------------

    /// Records the host window's physical size. A zero size (minimized)
    /// keeps the previous one.
    pub(crate) fn set_surface_size(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.surface = (width as f32, height as f32);
        }
    }

    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = Modifiers::from(state);
    }

    //--- Conversion -------------------------------------------------------

    /// `None` for keys the session has no use for.
    pub(crate) fn key(&self, event: &KeyEvent) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        match KeyCode::from(code) {
            KeyCode::Unidentified => None,
            key => Some(self.key_event(key, event.state)),
        }
    }

    pub(crate) fn button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = MouseButton::from(button);
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }

    pub(crate) fn cursor(&self, position: PhysicalPosition<f64>) -> InputEvent {
        let (width, height) = self.surface;
        InputEvent::MouseMoved {
            x: position.x as f32 * RENDER_WIDTH / width,
            y: position.y as f32 * RENDER_HEIGHT / height,
        }
    }

    fn key_event(&self, key: KeyCode, state: ElementState) -> InputEvent {
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Winit normalizes platform keys (macOS Cmd → Ctrl, Option → Alt).
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        match code {
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Enter | WinitKeyCode::NumpadEnter => KeyCode::Enter,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::Backspace => KeyCode::Backspace,
            WinitKeyCode::Delete => KeyCode::Delete,
            _ => KeyCode::Unidentified,
        }
    }
}

/// Back, Forward and numbered buttons collapse to `Other`.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
