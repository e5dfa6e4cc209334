//=========================================================================
// Tuning
//=========================================================================
//
// Every threshold and delay the director and the loss model read.
// Geometry constants live in `geometry`.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Tuning ==============================================================

/// Director and loss-model tunables. `Default` holds the shipped values.
///
/// Times are milliseconds, coverage and overlap values are fractions.
///
/// # Examples
///
/// ```
/// use pane_engine::core::Tuning;
///
/// let tuning = Tuning {
///     mood_ceiling: 50,
///     ..Tuning::default()
/// };
/// assert_eq!(tuning.loss_mood_step, 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    //--- Tutorial: move ---------------------------------------------------
    /// The tutorial window counts as placed when `x < .x && y < .y`.
    pub move_threshold: Vec2,
    pub move_hint_delay_ms: f32,
    pub move_hint_interval_ms: f32,
    /// Where the pointer indicator is shown while the window is not placed.
    pub move_hint_position: Vec2,

    //--- Tutorial: expand -------------------------------------------------
    /// Coverage mapped to content opacity 1 → 0.
    pub expand_band: (f32, f32),
    pub expand_completion: f32,
    pub expand_hint_delay_ms: f32,
    pub expand_hint_max_coverage: f32,

    //--- Stage 1 ----------------------------------------------------------
    /// Gap between the window's bottom edge and the surface at the target.
    pub stage1_bottom_margin: f32,
    pub stage1_completion_window: f32,
    pub stage1_hint_window: f32,
    pub stage1_hint_delay_ms: f32,
    /// Hint lines may start only in the even periods of the window timer.
    pub stage1_hint_period_ms: f32,

    //--- Stage 2 ----------------------------------------------------------
    pub stage2_hint_delay_ms: f32,
    pub stage2_hint_period_ms: f32,

    //--- Shared -----------------------------------------------------------
    /// Delay between a stage window appearing and its object spawning.
    pub spawn_delay_ms: f32,

    //--- Mood -------------------------------------------------------------
    pub loss_mood_step: u32,
    pub mood_ceiling: u32,
    pub mood_after_reset: u32,
    pub mood_after_stage1: u32,

    //--- Collisions & Finale ----------------------------------------------
    pub collision_cue_threshold: f32,
    pub heavy_collision_threshold: f32,
    pub alchemy_force: f32,
    pub finale_overlap: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_threshold: Vec2::new(100.0, 100.0),
            move_hint_delay_ms: 3000.0,
            move_hint_interval_ms: 3000.0,
            move_hint_position: Vec2::new(50.0, 50.0),

            expand_band: (0.05, 0.90),
            expand_completion: 0.90,
            expand_hint_delay_ms: 10_000.0,
            expand_hint_max_coverage: 0.20,

            stage1_bottom_margin: 20.0,
            stage1_completion_window: 30.0,
            stage1_hint_window: 50.0,
            stage1_hint_delay_ms: 4000.0,
            stage1_hint_period_ms: 3000.0,

            stage2_hint_delay_ms: 4000.0,
            stage2_hint_period_ms: 4000.0,

            spawn_delay_ms: 1000.0,

            loss_mood_step: 10,
            mood_ceiling: 100,
            mood_after_reset: 50,
            mood_after_stage1: 20,

            collision_cue_threshold: 2.0,
            heavy_collision_threshold: 5.0,
            alchemy_force: 8.0,
            finale_overlap: 0.8,
        }
    }
}

impl Tuning {
    /// Content opacity for a given surface coverage.
    pub fn content_alpha(&self, coverage: f32) -> f32 {
        let (low, high) = self.expand_band;
        let progress = ((coverage - low) / (high - low)).clamp(0.0, 1.0);
        1.0 - progress
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
