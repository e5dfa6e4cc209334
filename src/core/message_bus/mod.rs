//=========================================================================
// Message Bus
//=========================================================================
//
// Type-keyed queues connecting producers and consumers inside one tick.
//
// Producers in this crate:
//   Window          → ObjectLost
//   PropertyEditor  → ObjectDeleted
//   InputRouter     → SessionSignal
//   Director        → Cue
//
// The controller drains cues to the audio sink, then calls `clear_all()`
// at the tick boundary.
//
//=========================================================================

//=== Module Declarations =================================================

mod message_bus;
mod message_queue;

//=== Public API ==========================================================

pub use message_bus::{Message, MessageBus};
