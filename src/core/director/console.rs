//=========================================================================
// Boot Console
//=========================================================================
//
// Types a fixed script line by line for the opening cinematic. The
// director owns pacing between lines through its schedule.
//
//=========================================================================

const CHAR_INTERVAL_MS: f32 = 20.0;

#[derive(Debug)]
pub struct ConsoleTyper {
    script: &'static [&'static str],
    next_line: usize,
    current: Option<(&'static str, usize)>,
    timer_ms: f32,
    printed: Vec<String>,
}

/// Result of one console update.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConsoleUpdate {
    pub typed: usize,
    pub line_finished: bool,
}

impl ConsoleTyper {
    pub fn new(script: &'static [&'static str]) -> Self {
        Self {
            script,
            next_line: 0,
            current: None,
            timer_ms: 0.0,
            printed: Vec::new(),
        }
    }

    /// Starts typing the next script line. Returns false once the script
    /// is exhausted.
    pub fn begin_next_line(&mut self) -> bool {
        let Some(&line) = self.script.get(self.next_line) else {
            return false;
        };
        self.next_line += 1;
        self.current = Some((line, 0));
        self.timer_ms = 0.0;
        true
    }

    pub fn update(&mut self, dt_ms: f32) -> ConsoleUpdate {
        let mut result = ConsoleUpdate::default();
        let Some((line, mut revealed)) = self.current else {
            return result;
        };

        let length = line.chars().count();
        self.timer_ms += dt_ms;
        while self.timer_ms >= CHAR_INTERVAL_MS && revealed < length {
            self.timer_ms -= CHAR_INTERVAL_MS;
            revealed += 1;
            result.typed += 1;
        }

        if revealed >= length {
            self.printed.push(line.to_string());
            self.current = None;
            result.line_finished = true;
        } else {
            self.current = Some((line, revealed));
        }
        result
    }

    /// Completed lines followed by the partially typed one.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.printed.clone();
        if let Some((line, revealed)) = self.current {
            lines.push(line.chars().take(revealed).collect());
        }
        lines
    }

    pub fn is_typing(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.current.is_none() && self.next_line >= self.script.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
