//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use pane_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Session entry points
pub use crate::session::{Session, SessionBuilder, SessionError};
pub use crate::core::runtime::{SessionContext, SessionController};
pub use crate::core::platform_bridge::TickControl;
pub use crate::core::tuning::Tuning;

// Input
pub use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

// Windows and stages
pub use crate::core::director::{Overlay, Stage};
pub use crate::core::window::{Domain, WindowRole};

// Output boundaries
pub use crate::core::audio::{AudioSink, Cue};
pub use crate::core::render::{FrameSink, FrameSnapshot};

// Physics boundary
pub use crate::core::physics::{BodyHandle, PhysicsEngine};
