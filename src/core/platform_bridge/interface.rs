//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-session interface types (events and errors).
//
// Defines the contract between the windowing thread and the logic thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from the platform to the logic thread.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Batched input events for one redraw.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Host window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// Payloads are the rendered backend error so the type stays `Send`.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(String),

    #[error("event loop error: {0}")]
    EventLoopExecution(String),
}

//=========================================================================
// Unit Tests
//=========================================================================
