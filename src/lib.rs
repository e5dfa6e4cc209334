//=========================================================================
// pane_engine: Library Root
//
// Windowed-physics puzzle sessions: draggable sandbox windows with their
// own physics domains, objects that migrate between overlapping windows,
// and a director that sequences the session stage by stage.
//
// Typical usage:
// ```no_run
// use pane_engine::SessionBuilder;
//
// SessionBuilder::new().build().run().expect("session failed");
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds every system that runs on the logic thread. It is public
// so tools and tests can drive a `SessionController` headless.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` is the winit host and stays private.
//
mod platform;
mod session;

//--- Public Exports ------------------------------------------------------

pub use session::{Session, SessionBuilder, SessionError};
