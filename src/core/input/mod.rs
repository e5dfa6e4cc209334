//=========================================================================
// Input
//=========================================================================
//
// Platform-independent input events and their routing into the session.
//
// Architecture:
//   platform (winit) → InputEvent batches → InputRouter
//                                             ├─ StateTracker (pointer, held buttons)
//                                             ├─ Window drag / resize
//                                             ├─ PropertyEditor select / delete
//                                             └─ SessionSignal on the bus
//
//=========================================================================

//=== Module Declarations =================================================

mod event;
mod router;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use router::{InputRouter, SessionSignal};
pub use state_tracker::StateTracker;
