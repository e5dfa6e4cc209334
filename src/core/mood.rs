//=========================================================================
// Mood
//=========================================================================
//
// Session-scoped difficulty counter. Rises on every lost object; when it
// reaches the ceiling the director soft-resets the active stage.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Constants ===========================================================

/// Upper bound of the counter.
pub const MOOD_MAX: u32 = 100;

const CORONA_BASE_SPEED: f32 = 0.002;
const CORONA_SPEED_PER_MOOD: f32 = 0.0005;

//=== Mood ================================================================

/// Counter in `0..=MOOD_MAX`, mutated only through [`Mood::report_loss`]
/// and [`Mood::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mood {
    value: u32,
    loss_step: u32,
}

impl Mood {
    pub fn new(loss_step: u32) -> Self {
        Self { value: 0, loss_step }
    }

    /// Adds one loss step and returns the new value.
    pub fn report_loss(&mut self) -> u32 {
        self.value = (self.value + self.loss_step).min(MOOD_MAX);
        debug!(target: "director", "mood -> {}", self.value);
        self.value
    }

    pub fn set(&mut self, value: u32) {
        self.value = value.min(MOOD_MAX);
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Corona rotation speed the host shows for the current mood.
    pub fn corona_speed(&self) -> f32 {
        CORONA_BASE_SPEED + self.value as f32 * CORONA_SPEED_PER_MOOD
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
