//=========================================================================
// Session Context
//=========================================================================
//
// Shared data the director, input router and editor operate on.
//
// Contains:
// - engine: physics world behind the `PhysicsEngine` boundary
// - registry: live windows by role, in z-order
// - mood, editor, rng, tuning
// - bus: intra-tick messages (cues, losses, deletions, signals)
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::core::editor::PropertyEditor;
use crate::core::message_bus::MessageBus;
use crate::core::mood::Mood;
use crate::core::physics::PhysicsEngine;
use crate::core::tuning::Tuning;
use crate::core::window::WindowRegistry;

//=== SessionContext ======================================================

/// Session state shared by the controller's systems.
///
/// Systems receive `&mut SessionContext` and borrow the fields they need
/// side by side, e.g. a window from `registry` together with `engine`.
pub struct SessionContext {
    pub engine: Box<dyn PhysicsEngine>,
    pub registry: WindowRegistry,
    pub mood: Mood,
    pub bus: MessageBus,
    pub editor: PropertyEditor,

    /// Source of void-domain drift. Seeded for reproducible sessions.
    pub rng: StdRng,

    pub tuning: Tuning,
}

impl SessionContext {
    /// Creates an empty session around `engine`. Without a seed the RNG
    /// is seeded from the OS.
    pub fn new(engine: Box<dyn PhysicsEngine>, tuning: Tuning, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            engine,
            registry: WindowRegistry::new(),
            mood: Mood::new(tuning.loss_mood_step),
            bus: MessageBus::new(),
            editor: PropertyEditor::new(),
            rng,
            tuning,
        }
    }
}
