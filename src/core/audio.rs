//=========================================================================
// Audio Boundary
//=========================================================================
//
// The core never synthesises sound. It publishes `Cue`s on the message
// bus during a tick; the controller drains them into an `AudioSink` at
// the tick boundary.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Cue =================================================================

/// A sound the host should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Typewriter click; at most one per tick.
    Type,

    /// Collision start with a relative speed above the light threshold.
    CollisionLight,

    /// Collision start with a relative speed above the heavy threshold.
    CollisionHeavy,

    /// Lost object, jump scare.
    Error,

    /// Objective reached.
    Success,
}

//=== AudioSink ===========================================================

/// Receives the cues of one tick, in publication order.
pub trait AudioSink: Send {
    fn play(&mut self, cue: Cue);
}

/// Default sink: logs every cue except typewriter clicks.
#[derive(Debug, Default)]
pub struct LogAudioSink;

impl AudioSink for LogAudioSink {
    fn play(&mut self, cue: Cue) {
        if cue != Cue::Type {
            debug!(target: "session", "cue {:?}", cue);
        }
    }
}

/// Sink that keeps every cue, for headless drivers and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudioSink {
    played: std::sync::Arc<std::sync::Mutex<Vec<Cue>>>,
}

impl RecordingAudioSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything played so far.
    pub fn played(&self) -> Vec<Cue> {
        self.played.lock().map(|cues| cues.clone()).unwrap_or_default()
    }
}

impl AudioSink for RecordingAudioSink {
    fn play(&mut self, cue: Cue) {
        if let Ok(mut cues) = self.played.lock() {
            cues.push(cue);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_shares_history_between_clones() {
        let probe = RecordingAudioSink::new();
        let mut sink: Box<dyn AudioSink> = Box::new(probe.clone());

        sink.play(Cue::Success);
        sink.play(Cue::Error);

        assert_eq!(probe.played(), vec![Cue::Success, Cue::Error]);
    }
}
