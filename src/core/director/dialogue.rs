//=========================================================================
// Dialogue Queue
//=========================================================================
//
// Typewriter narration, one line at a time.
//
// Line lifecycle:
//   typing (1 char / 50 ms) → display (duration) → fade (alpha -= dt·0.002)
//                                                      ↓
//                                  continuation returned, next line starts
//
// Flashes (progress readouts) bypass the queue: they show instantly for
// their duration and never carry a continuation.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

//=== Internal Dependencies ===============================================

use super::Continuation;

//=== Constants ===========================================================

const TYPE_INTERVAL_MS: f32 = 50.0;
const FADE_PER_MS: f32 = 0.002;

//=== Types ===============================================================

#[derive(Debug, Clone)]
struct Line {
    text: String,
    duration_ms: f32,
    then: Option<Continuation>,
}

#[derive(Debug, Clone)]
struct Flash {
    text: String,
    remaining_ms: f32,
}

/// What one update produced.
#[derive(Debug, Default)]
pub struct DialogueUpdate {
    /// Characters revealed this update.
    pub typed: usize,

    /// Continuations of lines that finished fading this update.
    pub finished: Vec<Continuation>,
}

//=== DialogueQueue =======================================================

#[derive(Debug)]
pub struct DialogueQueue {
    lines: VecDeque<Line>,
    revealed: usize,
    type_timer_ms: f32,
    display_ms: f32,
    alpha: f32,
    flash: Option<Flash>,
}

impl DialogueQueue {
    pub fn new() -> Self {
        Self {
            lines: VecDeque::new(),
            revealed: 0,
            type_timer_ms: 0.0,
            display_ms: 0.0,
            alpha: 1.0,
            flash: None,
        }
    }

    //--- Queueing ---------------------------------------------------------

    /// Appends a line. `then` runs once the line has faded out.
    pub fn say(&mut self, text: impl Into<String>, duration_ms: f32, then: Option<Continuation>) {
        self.lines.push_back(Line {
            text: text.into(),
            duration_ms,
            then,
        });
    }

    /// Shows `text` immediately for `duration_ms`, over whatever is queued.
    pub fn flash(&mut self, text: impl Into<String>, duration_ms: f32) {
        self.flash = Some(Flash {
            text: text.into(),
            remaining_ms: duration_ms,
        });
    }

    /// Drops every line and flash. Pending continuations are returned so
    /// the caller can resolve them.
    pub fn clear(&mut self) -> Vec<Continuation> {
        let pending = self.lines.drain(..).filter_map(|line| line.then).collect();
        self.flash = None;
        self.reset_line_state();
        pending
    }

    //--- Update -----------------------------------------------------------

    pub fn update(&mut self, dt_ms: f32) -> DialogueUpdate {
        let mut result = DialogueUpdate::default();

        if let Some(flash) = &mut self.flash {
            flash.remaining_ms -= dt_ms;
            if flash.remaining_ms <= 0.0 {
                self.flash = None;
            }
        }

        let Some(line) = self.lines.front() else {
            return result;
        };

        let length = line.text.chars().count();
        if self.revealed < length {
            self.type_timer_ms += dt_ms;
            while self.type_timer_ms >= TYPE_INTERVAL_MS && self.revealed < length {
                self.type_timer_ms -= TYPE_INTERVAL_MS;
                self.revealed += 1;
                result.typed += 1;
            }
            return result;
        }

        if self.display_ms < line.duration_ms {
            self.display_ms += dt_ms;
            return result;
        }

        self.alpha -= dt_ms * FADE_PER_MS;
        if self.alpha <= 0.0 {
            if let Some(then) = self.lines.pop_front().and_then(|line| line.then) {
                result.finished.push(then);
            }
            self.reset_line_state();
        }

        result
    }

    //--- Queries ----------------------------------------------------------

    /// A line is typing, displayed or fading.
    pub fn is_busy(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Visible text and its opacity. A flash wins over the queued line.
    pub fn visible(&self) -> Option<(&str, f32)> {
        if let Some(flash) = &self.flash {
            return Some((flash.text.as_str(), 1.0));
        }

        let line = self.lines.front()?;
        let end = line
            .text
            .char_indices()
            .nth(self.revealed)
            .map(|(index, _)| index)
            .unwrap_or(line.text.len());
        Some((&line.text[..end], self.alpha.max(0.0)))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    fn reset_line_state(&mut self) {
        self.revealed = 0;
        self.type_timer_ms = 0.0;
        self.display_ms = 0.0;
        self.alpha = 1.0;
    }
}

impl Default for DialogueQueue {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::director::Stage;

    fn run(queue: &mut DialogueQueue, ms: f32) -> DialogueUpdate {
        let mut total = DialogueUpdate::default();
        let mut elapsed = 0.0;
        while elapsed < ms {
            let step = queue.update(10.0);
            total.typed += step.typed;
            total.finished.extend(step.finished);
            elapsed += 10.0;
        }
        total
    }

    #[test]
    fn types_one_character_per_interval() {
        let mut queue = DialogueQueue::new();
        queue.say("Hold it.", 1000.0, None);

        let update = run(&mut queue, 150.0);
        assert_eq!(update.typed, 3);
        assert_eq!(queue.visible(), Some(("Hol", 1.0)));
    }

    #[test]
    fn continuation_fires_after_type_display_and_fade() {
        let mut queue = DialogueQueue::new();
        queue.say("ab", 100.0, Some(Continuation::EnterStage(Stage::Stage2)));

        // 100 ms typing, 100 ms display, 500 ms fade.
        let early = run(&mut queue, 600.0);
        assert!(early.finished.is_empty());
        assert!(queue.is_busy());

        let late = run(&mut queue, 200.0);
        assert_eq!(late.finished, vec![Continuation::EnterStage(Stage::Stage2)]);
        assert!(!queue.is_busy());
    }

    #[test]
    fn lines_play_in_order() {
        let mut queue = DialogueQueue::new();
        queue.say("a", 0.0, Some(Continuation::Glitch));
        queue.say("b", 0.0, Some(Continuation::JumpScare));

        let update = run(&mut queue, 2000.0);
        assert_eq!(update.finished, vec![Continuation::Glitch, Continuation::JumpScare]);
    }

    #[test]
    fn flash_overrides_and_expires() {
        let mut queue = DialogueQueue::new();
        queue.say("queued", 5000.0, None);
        queue.flash("System Loading... 42%", 500.0);

        assert_eq!(queue.visible(), Some(("System Loading... 42%", 1.0)));
        run(&mut queue, 500.0);
        assert_ne!(queue.visible().map(|(text, _)| text), Some("System Loading... 42%"));
    }

    #[test]
    fn clear_returns_pending_continuations() {
        let mut queue = DialogueQueue::new();
        queue.say("one", 1000.0, None);
        queue.say("two", 1000.0, Some(Continuation::EndSession));
        run(&mut queue, 60.0);

        assert_eq!(queue.clear(), vec![Continuation::EndSession]);
        assert!(!queue.is_busy());
        assert_eq!(queue.visible(), None);
    }

    #[test]
    fn multibyte_text_reveals_on_char_boundaries() {
        let mut queue = DialogueQueue::new();
        queue.say("é→x", 100.0, None);

        run(&mut queue, 100.0);
        assert_eq!(queue.visible(), Some(("é→", 1.0)));
    }
}
