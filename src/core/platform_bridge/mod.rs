//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the windowing host (winit) with the session's logic thread.
//
// The session only sees `PlatformEvent`s arriving over a channel, so
// headless drivers and tests can feed it without opening a window.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Logic-side event collection and batching
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use event_collector::TickControl;
pub use interface::PlatformError;

//=== Internal API ========================================================

pub(crate) use event_collector::EventCollector;
pub(crate) use interface::PlatformEvent;
