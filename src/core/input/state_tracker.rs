//=========================================================================
// State Tracker
//=========================================================================
//
// Persistent pointer and keyboard state rebuilt from the event stream.
//
// Architecture:
//   InputEvent → process_event() → position + HashSets (held) → query
//
// Button events carry no coordinates; consumers read the pointer
// position from here at the moment the button event is processed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== StateTracker ========================================================

#[derive(Debug, Default)]
pub struct StateTracker {
    pointer: Vec2,
    buttons_down: HashSet<MouseButton>,
    keys_down: HashSet<KeyCode>,
    modifiers: Modifiers,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event. Returns true for a button or key transition
    /// (press while up, release while down); repeats return false.
    pub fn process_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                self.keys_down.insert(*key)
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                self.keys_down.remove(key)
            }
            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                self.buttons_down.insert(*button)
            }
            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                self.buttons_down.remove(button)
            }
            InputEvent::MouseMoved { x, y } => {
                self.pointer = Vec2::new(*x, *y);
                false
            }
            InputEvent::Unidentified => false,
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Last pointer position in render coordinates.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
