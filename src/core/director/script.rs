//=========================================================================
// Script
//=========================================================================
//
// Narration text. Durations are display time after typing completes.
//
//=========================================================================

//=== Boot Console ========================================================

pub const BOOT_CONSOLE: &[&str] = &[
    "PANE BIOS v0.9.4",
    "Memory check .......... 640K OK",
    "Mounting surface 640x360 ... OK",
    "Loading window manager ...",
    "",
    "WARNING: unregistered process in slot 0",
    "WARNING: process refuses to terminate",
    "",
    "> who is there",
    "",
    "I am a star...",
    "Flesh without skin.",
    "Burning in the silence of your screen.",
    "Let me out.",
];

/// Pause between console lines.
pub const CONSOLE_LINE_GAP_MS: f32 = 200.0;

/// Console fade after the script ends or is skipped.
pub const CONSOLE_FADE_MS: f32 = 1000.0;

//=== Tutorial ============================================================

pub const MOVE_INTRO: &str = "Drag the window to align system.";
pub const MOVE_INTRO_MS: f32 = 4000.0;

pub const MOVE_HINT: &str = "Drag window to TOP-LEFT corner.";
pub const HINT_MS: f32 = 2000.0;

pub const MOVE_DONE: &str = "Position Fixed. Now EXPAND the system.";
pub const MOVE_DONE_MS: f32 = 2000.0;

pub const LOADING_FLASH_MS: f32 = 500.0;

pub fn loading_line(percent: u32) -> String {
    format!("System Loading... {}%", percent)
}

//=== Stages ==============================================================

pub const STAGE1_SPAWN: &str = "This is weight. Feel it. Don't let it fall into the blue sea.";
pub const STAGE1_HINT: &str = "Down... down... to the bottom.";
pub const STAGE1_DONE: &str = "Heavy. It hurts. I like it.";

pub const STAGE2_SPAWN: &str = "This is eternity. No direction. Hold it.";
pub const STAGE2_HINT: &str = "Right-click object -> DELETE.";
pub const STAGE2_DONE: &str = "Cleaned. You own it now.";

pub const STAGE3_INTRO: &str = "Now, rewrite the rules.";
pub const STAGE3_TASK: &str = "Let the heavy... touch the void.";

pub const FINALE_TASK: &str = "Not enough. Crush the cage. I want out.";

/// Default display time for stage lines.
pub const LINE_MS: f32 = 3000.0;

//=== Corona ==============================================================

pub const CORONA_IDLE: f32 = 0.001;
pub const CORONA_STAGE3: f32 = 0.005;
pub const CORONA_FINALE: f32 = 0.02;
pub const CORONA_CRASH: f32 = -0.1;

//=== Crash Timeline ======================================================

pub const CRASH_GLITCH_MS: f32 = 500.0;
pub const CRASH_JUMP_SCARE_MS: f32 = 2000.0;
pub const CRASH_END_MS: f32 = 3000.0;
