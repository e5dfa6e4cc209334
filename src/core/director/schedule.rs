//=========================================================================
// Schedule
//=========================================================================
//
// Deferred director actions.
//
// Every entry is tagged with the stage that queued it. The director
// drops entries whose owner is no longer the current stage instead of
// letting a delayed spawn or line leak into a later stage.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Stage;
use crate::core::window::{ObjectLabel, ObjectShape, WindowRole};

//=== Continuation ========================================================

/// Something the director does later: after a delay, or once a dialogue
/// line has faded out.
#[derive(Debug, Clone, PartialEq)]
pub enum Continuation {
    /// Start typing the next boot-console line.
    NextConsoleLine,

    /// Boot console has faded; open the tutorial window.
    BeginTutorial,

    /// Spawn a stage object into a window, then speak `line` if any.
    SpawnObject {
        role: WindowRole,
        label: ObjectLabel,
        shape: ObjectShape,
        line: Option<&'static str>,
    },

    /// Advance to a later stage.
    EnterStage(Stage),

    //--- Crash Sequence ---------------------------------------------------
    Glitch,
    JumpScare,
    EndSession,
}

//=== Schedule ============================================================

#[derive(Debug, Clone)]
struct Entry {
    fire_at_ms: f64,
    seq: u64,
    owner: Stage,
    action: Continuation,
}

/// Time-ordered queue of deferred actions.
///
/// Entries due at the same instant fire in the order they were pushed.
#[derive(Debug, Default)]
pub struct Schedule {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `action` to fire at session time `fire_at_ms`.
    pub fn push(&mut self, fire_at_ms: f64, owner: Stage, action: Continuation) {
        self.entries.push(Entry {
            fire_at_ms,
            seq: self.next_seq,
            owner,
            action,
        });
        self.next_seq += 1;
    }

    /// Removes and returns every entry due at or before `now_ms`, oldest
    /// first, with the stage that queued it.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<(Stage, Continuation)> {
        let (mut due, pending): (Vec<Entry>, Vec<Entry>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.fire_at_ms <= now_ms);
        self.entries = pending;

        due.sort_by(|a, b| a.fire_at_ms.total_cmp(&b.fire_at_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|entry| (entry.owner, entry.action)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_fires_early() {
        let mut schedule = Schedule::new();
        schedule.push(500.0, Stage::Crash, Continuation::Glitch);

        assert!(schedule.take_due(499.0).is_empty());
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn due_entries_fire_in_time_then_push_order() {
        let mut schedule = Schedule::new();
        schedule.push(3000.0, Stage::Crash, Continuation::EndSession);
        schedule.push(500.0, Stage::Crash, Continuation::Glitch);
        schedule.push(2000.0, Stage::Crash, Continuation::JumpScare);
        schedule.push(500.0, Stage::Finale, Continuation::NextConsoleLine);

        let due = schedule.take_due(3000.0);
        let actions: Vec<Continuation> = due.into_iter().map(|(_, action)| action).collect();
        assert_eq!(
            actions,
            vec![
                Continuation::Glitch,
                Continuation::NextConsoleLine,
                Continuation::JumpScare,
                Continuation::EndSession,
            ]
        );
        assert!(schedule.is_empty());
    }

    #[test]
    fn owner_travels_with_entry() {
        let mut schedule = Schedule::new();
        schedule.push(10.0, Stage::Stage1, Continuation::BeginTutorial);

        assert_eq!(schedule.take_due(10.0)[0].0, Stage::Stage1);
    }
}
