//=========================================================================
// Platform Subsystem
//
// Hosts the session in a winit window and feeds it input over a channel.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop        │    │  SessionController   │
//  │   ↓                      │    │   ↓                  │
//  │  InputProcessor          │    │  InputRouter         │
//  │   ├─ Converts Winit      │    │   ↓                  │
//  │   ├─ Tracks modifiers    │    │  physics, transfers, │
//  │   └─ Scales to 640×360   │    │  director            │
//  │   ↓                      │    │                      │
//  │  InputBuffer             │    └──────────────────────┘
//  │   ├─ discrete: Vec<>     │             ↑    │
//  │   └─ continuous: Set<>   │             │    │ shutdown flag
//  │   ↓                      │             │    ↓
//  │  RedrawRequested (flush) ┼─────────────┘  polled on redraw
//  └──────────────────────────┘    PlatformEvent
// ```
//
// Frame boundary is RedrawRequested: all buffered input is sent as one
// batch. Empty buffers are not sent. If the logic thread is gone the
// platform logs and keeps running so the window can still be closed.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::geometry::{RENDER_HEIGHT, RENDER_WIDTH};
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Host window and input aggregator.
///
/// Runs on the main thread (Winit requirement on macOS/iOS). Not Send;
/// talks to the logic thread only through `event_sender` and `shutdown`.
///
/// The window is created lazily in `resumed()`.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Buffers discrete/continuous input until frame boundary.
    buffer: InputBuffer,

    event_sender: Sender<PlatformEvent>,

    input_processor: InputProcessor,

    /// Raised by the logic thread when the session has ended.
    shutdown: Arc<AtomicBool>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(event_sender: Sender<PlatformEvent>, shutdown: Arc<AtomicBool>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
            shutdown,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes or the session
    /// ends.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new()
            .map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered input as one [`PlatformEvent::Inputs`].
    ///
    /// A disconnected channel means the logic thread is gone; the events
    /// are dropped with a warning.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let discrete_count = discrete.len();
            let continuous_count = continuous.len();
            let total_events = discrete_count + continuous_count;

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );

            if self.event_sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events",
                    total_events
                );
            }
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the host window on first resume (again after a mobile
    /// suspend is a no-op).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("pane_engine")
            .with_inner_size(LogicalSize::new(RENDER_WIDTH * 2.0, RENDER_HEIGHT * 2.0));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.input_processor.set_surface_size(size.width, size.height);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                debug!(target: "platform", "Resized to {}x{}", size.width, size.height);
                self.input_processor.set_surface_size(size.width, size.height);
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.buffer.push_continuous(self.input_processor.cursor(position));
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.key(&key_event) {
                    Some(event) => self.buffer.push_discrete(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.buffer.push_discrete(self.input_processor.button(button, state));
            }

            WindowEvent::RedrawRequested => {
                if self.shutdown.load(Ordering::Acquire) {
                    info!(target: "platform", "Session ended, closing window");
                    event_loop.exit();
                    return;
                }

                // Frame boundary: flush all buffered input
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
