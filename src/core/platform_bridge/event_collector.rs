//=========================================================================
// Event Collector
//=========================================================================
//
// Logic-side inbox for platform events.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → input batches → TickControl
//
// A tick accepts at most MAX_INPUTS_PER_TICK input events; anything past
// that stays queued in the channel for the next tick. Each redraw batch
// contributes its discrete events first and its coalesced pointer move
// second: a click sharing a redraw with a move is hit-tested at the
// pointer position from before that move.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

//=== Constants ===========================================================

const MAX_INPUTS_PER_TICK: usize = 100;
const IDLE_SLEEP: Duration = Duration::from_millis(1);

//=== TickControl =========================================================

/// Whether the logic loop keeps ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    batches: Vec<Vec<InputEvent>>,
    accepted: usize,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            batches: Vec::with_capacity(4),
            accepted: 0,
        }
    }

    /// Drains the channel up to this tick's input budget. Returns `Exit`
    /// on a close request or once the platform side has hung up.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.batches.clear();
        self.accepted = 0;

        while self.accepted < MAX_INPUTS_PER_TICK {
            let event = match self.receiver.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
            };

            match event {
                PlatformEvent::WindowClosed => return TickControl::Exit,
                PlatformEvent::Inputs { discrete, continuous } => {
                    self.accept(discrete);
                    self.accept(continuous);
                }
            }
        }

        if self.accepted >= MAX_INPUTS_PER_TICK {
            warn!(
                target: "session",
                "input backlog: {} events accepted, {} batches still queued",
                self.accepted,
                self.receiver.len()
            );
        } else if self.accepted == 0 {
            // Nothing arrived; yield instead of spinning the pacing loop.
            thread::sleep(IDLE_SLEEP);
        } else {
            trace!(target: "session", "collected {} input events", self.accepted);
        }

        TickControl::Continue
    }

    /// Hands this tick's batches to the caller in arrival order.
    pub(crate) fn take_batches(&mut self) -> Vec<Vec<InputEvent>> {
        std::mem::take(&mut self.batches)
    }

    #[cfg(test)]
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.batches
    }

    fn accept(&mut self, batch: Vec<InputEvent>) {
        if !batch.is_empty() {
            self.accepted += batch.len();
            self.batches.push(batch);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
