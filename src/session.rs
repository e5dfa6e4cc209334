//=========================================================================
// Session
//
// Entry point: configures a session and runs it inside a host window.
//
// Architecture:
// ```text
//     SessionBuilder  ──build()──────────>  Session  ──run()──>  [Runtime]
//         │                                                        │
//         ├─ with_tps()                     ──build_headless()──>  SessionController
//         ├─ with_channel_capacity()            (no window, caller ticks)
//         ├─ with_seed() / with_tuning()
//         └─ with_frame_sink() / with_audio_sink()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::audio::{AudioSink, LogAudioSink};
use crate::core::physics::SimpleWorld;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use crate::core::render::{FrameSink, LogFrameSink};
use crate::core::runtime::{SessionContext, SessionController};
use crate::core::tuning::Tuning;
use crate::core::CoreSystemsOrchestrator;
use crate::platform::Platform;

//=== SessionError ========================================================

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("logic thread panicked")]
    LogicThreadPanicked,
}

//=== SessionBuilder ======================================================

/// Builder for configuring and constructing a [`Session`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic ticks per second)
/// - **Channel capacity**: 128 events
/// - **Seed**: none (OS entropy)
/// - **Sinks**: log-only frame and audio sinks
///
/// # Examples
///
/// ```no_run
/// use pane_engine::SessionBuilder;
///
/// SessionBuilder::new()
///     .with_tps(120.0)
///     .with_seed(7)
///     .build()
///     .run()
///     .expect("session failed");
/// ```
///
/// Headless, driven by the caller:
/// ```
/// use pane_engine::SessionBuilder;
/// use pane_engine::core::{Stage, TickControl};
///
/// let mut session = SessionBuilder::new().with_seed(1).build_headless();
/// assert_eq!(session.tick(16.0), TickControl::Continue);
/// assert_eq!(session.stage(), Stage::Cinematic);
/// ```
pub struct SessionBuilder {
    tps: f64,
    channel_capacity: usize,
    seed: Option<u64>,
    tuning: Tuning,
    frame_sink: Box<dyn FrameSink>,
    audio_sink: Box<dyn AudioSink>,
}

impl SessionBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            seed: None,
            tuning: Tuning::default(),
            frame_sink: Box::new(LogFrameSink),
            audio_sink: Box::new(LogAudioSink),
        }
    }

    /// Sets the target ticks per second for the logic thread. Each tick
    /// advances the session by `1000 / tps` milliseconds.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → logic communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Seeds the session RNG for reproducible void-domain drift.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_frame_sink(mut self, sink: impl FrameSink + 'static) -> Self {
        self.frame_sink = Box::new(sink);
        self
    }

    pub fn with_audio_sink(mut self, sink: impl AudioSink + 'static) -> Self {
        self.audio_sink = Box::new(sink);
        self
    }

    /// Builds a session that opens a host window on [`Session::run`].
    pub fn build(self) -> Session {
        info!(
            target: "session",
            "building session (TPS: {}, channel: {}, seed: {:?})",
            self.tps,
            self.channel_capacity,
            self.seed
        );

        let tps = self.tps;
        let channel_capacity = self.channel_capacity;
        Session {
            orchestrator: CoreSystemsOrchestrator::new(self.build_headless()),
            tps,
            channel_capacity,
        }
    }

    /// Builds the controller alone; the caller feeds input and ticks it.
    pub fn build_headless(self) -> SessionController {
        let context = SessionContext::new(Box::new(SimpleWorld::new()), self.tuning, self.seed);
        SessionController::new(context, self.frame_sink, self.audio_sink)
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Session =============================================================

/// A configured session waiting to run.
///
/// ```text
/// Session (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► SessionController: router, physics, transfers, director
///   │
///   └─► Platform (winit event loop)
///         └─► Host window, input batching
///
/// Communication: crossbeam channel (PlatformEvent) + shutdown flag
/// ```
pub struct Session {
    orchestrator: CoreSystemsOrchestrator,
    tps: f64,
    channel_capacity: usize,
}

impl Session {
    /// Runs the session and blocks until the host window closes or the
    /// session ends.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded platform → logic channel
    /// 2. Spawns the logic thread at the configured TPS
    /// 3. Runs the winit event loop on this thread (blocks here)
    /// 4. On close: the channel disconnects and the logic thread exits;
    ///    on session end: the logic thread raises the shutdown flag and
    ///    the platform closes the window
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Platform`] if the event loop fails and
    /// [`SessionError::LogicThreadPanicked`] if the logic thread panics.
    pub fn run(self) -> Result<(), SessionError> {
        info!(target: "session", "starting session runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);
        let shutdown = Arc::new(AtomicBool::new(false));

        //--- 2. Spawn the logic thread ------------------------------------
        let core_handle = self
            .orchestrator
            .spawn_core_thread(rx, self.tps, Arc::clone(&shutdown));
        info!(target: "session", "logic thread spawned");

        //--- 3. Launch the platform ---------------------------------------
        let platform_result = Platform::new(tx, shutdown).run();
        info!(target: "session", "platform event loop exited");

        //--- 4. Wait for the logic thread ---------------------------------
        let join_result = core_handle.join();
        if join_result.is_err() {
            error!(target: "session", "logic thread panicked");
        }

        platform_result?;
        join_result.map_err(|_| SessionError::LogicThreadPanicked)?;

        info!(target: "session", "session shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::RecordingAudioSink;
    use crate::core::director::Stage;
    use crate::core::render::LatestFrameSink;

    //=====================================================================
    // SessionBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = SessionBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.seed, None);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        SessionBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        SessionBuilder::new().with_tps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        SessionBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let session = SessionBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_seed(9)
            .build();

        assert_eq!(session.tps, 120.0);
        assert_eq!(session.channel_capacity, 256);
    }

    #[test]
    fn headless_build_uses_configured_sinks_and_tuning() {
        let frames = LatestFrameSink::new();
        let audio = RecordingAudioSink::new();
        let tuning = Tuning {
            loss_mood_step: 25,
            ..Tuning::default()
        };

        let mut controller = SessionBuilder::new()
            .with_seed(4)
            .with_tuning(tuning)
            .with_frame_sink(frames.clone())
            .with_audio_sink(audio.clone())
            .build_headless();

        for _ in 0..60 {
            controller.tick(1000.0 / 60.0);
        }

        assert_eq!(controller.stage(), Stage::Cinematic);
        assert_eq!(controller.context().tuning.loss_mood_step, 25);
        assert!(frames.latest().is_some());
        assert!(!audio.played().is_empty());
    }

    #[test]
    fn session_error_wraps_platform_error() {
        let err: SessionError = PlatformError::EventLoopCreation("no display".into()).into();
        assert_eq!(err.to_string(), "event loop creation failed: no display");
        assert_eq!(SessionError::LogicThreadPanicked.to_string(), "logic thread panicked");
    }
}
