//=========================================================================
// Stages
//=========================================================================

/// Narrative stage of a session, in play order.
///
/// The derived ordering is the play order: the director only ever moves
/// to a strictly greater stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Boot console typing itself out.
    Cinematic,

    /// Drag the tutorial window to the top-left corner.
    TutorialMove,

    /// Resize the tutorial window over most of the surface.
    TutorialExpand,

    /// Lower the lunar window to the bottom.
    Stage1,

    /// Delete the object in the void window.
    Stage2,

    /// Bring a mass object into contact with a void object.
    Stage3,

    /// Overlap the two windows.
    Finale,

    /// Scripted shutdown sequence; terminal.
    Crash,
}

impl Stage {
    /// Whether stage objects are live in this stage.
    pub fn has_objects(&self) -> bool {
        matches!(self, Self::Stage1 | Self::Stage2 | Self::Stage3 | Self::Finale)
    }
}

/// Progress inside the current stage.
///
/// `Complete` is set once the stage objective fires, so it fires once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubState {
    Start,
    Active,
    Complete,
}

//=========================================================================
// Unit Tests
//=========================================================================
