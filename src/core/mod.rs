//=========================================================================
// Core Systems Orchestrator
//
// Everything that runs on the logic (non-platform) thread.
//
// Responsibilities:
// - Own the session controller and tick it at a fixed rate (TPS)
// - Receive platform input batches through the event collector
// - Raise the shared shutdown flag once the session ends
//
// Notes:
// The logic thread never touches winit. Communication with the platform
// happens only through the crossbeam channel and the shutdown flag.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod audio;
pub mod director;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod message_bus;
pub mod mood;
pub mod physics;
pub mod platform_bridge;
pub mod render;
pub mod runtime;
pub mod transfer;
pub mod tuning;
pub mod window;

//=== Re-exports ==========================================================

pub use audio::{AudioSink, Cue, LogAudioSink, RecordingAudioSink};
pub use director::{Director, Overlay, Stage};
pub use geometry::Rect;
pub use input::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use physics::{PhysicsEngine, SimpleWorld};
pub use platform_bridge::TickControl;
pub use render::{FrameSink, FrameSnapshot, LatestFrameSink, LogFrameSink};
pub use runtime::{SessionContext, SessionController};
pub use tuning::Tuning;
pub use window::{Window, WindowRegistry, WindowRole};

//=== Standard Library Imports ============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::{info, trace};

//=== Internal Modules ====================================================

use platform_bridge::{EventCollector, PlatformEvent};

//=== CoreSystemsOrchestrator =============================================
//
// Moves a built session onto its own thread and paces it.
//
pub(crate) struct CoreSystemsOrchestrator {
    controller: SessionController,
}

impl CoreSystemsOrchestrator {
    pub(crate) fn new(controller: SessionController) -> Self {
        Self { controller }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collects platform events (exit on close or disconnect)
    //  2. Routes input batches in arrival order
    //  3. Ticks the session by the fixed step
    //  4. Sleeps out the remainder of the frame
    //
    // `shutdown` is raised on every exit path so the platform can close.
    //
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
        shutdown: Arc<AtomicBool>,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);
        let dt_ms = (1000.0 / tps) as f32;

        thread::spawn(move || {
            let mut controller = self.controller;
            let mut collector = EventCollector::new(receiver);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!(target: "session", "platform closed, logic thread exiting");
                    break;
                }

                //--- Step 2: Route input -----------------------------------
                for batch in collector.take_batches() {
                    controller.handle_input(&batch);
                }

                //--- Step 3: Tick ------------------------------------------
                if controller.tick(dt_ms) == TickControl::Exit {
                    info!(target: "session", "session ended, logic thread exiting");
                    break;
                }

                //--- Step 4: Maintain fixed pacing -------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                } else {
                    trace!(target: "session", "tick overran by {:?}", elapsed - frame_duration);
                }
            }

            shutdown.store(true, Ordering::Release);
        })
    }
}
