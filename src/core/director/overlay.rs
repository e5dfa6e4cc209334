//=========================================================================
// Overlay
//=========================================================================
//
// Everything the director wants drawn on top of the windows. Rebuilt by
// the director every tick and copied into the frame snapshot.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::Stage;

//=== Effects =============================================================

/// Host-side visual effects requested by the director.
#[derive(Debug, Clone, PartialEq)]
pub struct Effects {
    /// Screen flickers to play; nonzero for one frame.
    pub flicker: u32,

    pub glitch_intensity: f32,
    pub jump_scare: bool,

    /// Rotation speed of the host's corona; grows with the mood.
    pub corona_speed: f32,

    /// Opacity of the boot console.
    pub console_alpha: f32,

    /// The host figure is drawn once the tutorial begins.
    pub host_visible: bool,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            flicker: 0,
            glitch_intensity: 0.0,
            jump_scare: false,
            corona_speed: 0.0,
            console_alpha: 1.0,
            host_visible: false,
        }
    }
}

//=== Overlay =============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DialogueView {
    pub text: String,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub stage: Stage,
    pub console_lines: Vec<String>,
    pub dialogue: Option<DialogueView>,

    /// Pointer indicator position in render coordinates.
    pub hint: Option<Vec2>,

    pub effects: Effects,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            stage: Stage::Cinematic,
            console_lines: Vec::new(),
            dialogue: None,
            hint: None,
            effects: Effects::default(),
        }
    }
}
