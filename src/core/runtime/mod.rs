//=========================================================================
// Session Runtime
//=========================================================================
//
// Session state and the controller that ticks it.
//
//   SessionContext     shared data (engine, windows, mood, bus, editor)
//   SessionController  input routing + fixed tick order + sinks
//
//=========================================================================

//=== Module Declarations =================================================

mod context;
mod controller;

//=== Public API ==========================================================

pub use context::SessionContext;
pub use controller::SessionController;
