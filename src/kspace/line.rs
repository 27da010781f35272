use super::TOTAL_LINES;

/// The phase-encode line currently being acquired. This is the only state
/// the k-space model owns: it steps once per acquisition period, wrapping
/// around after the last line, unless the user scrubbed to a line by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseEncodeLine {
    line: usize,
    initial: usize,
    acquiring: bool,
}

impl Default for PhaseEncodeLine {
    /// Start at the centre of k-space.
    fn default() -> Self {
        Self::new(TOTAL_LINES / 2)
    }
}

impl PhaseEncodeLine {
    /// `initial` is clamped to the last line.
    pub fn new(initial: usize) -> Self {
        let initial = initial.min(TOTAL_LINES - 1);
        Self {
            line: initial,
            initial,
            acquiring: true,
        }
    }

    pub fn get(&self) -> usize {
        self.line
    }

    /// Whether automatic advancement is enabled.
    pub fn is_acquiring(&self) -> bool {
        self.acquiring
    }

    /// Unconditionally step to the next line. Returns the new line.
    pub fn advance(&mut self) -> usize {
        self.line = (self.line + 1) % TOTAL_LINES;
        self.line
    }

    /// Called by the acquisition timer. Only advances while acquiring,
    /// returns whether the line changed.
    pub fn on_timer(&mut self) -> bool {
        if self.acquiring {
            self.advance();
        }
        self.acquiring
    }

    /// Jump to `line` (clamped to the last line) and stop automatic
    /// advancement until `resume` is called.
    pub fn set_manual(&mut self, line: usize) {
        self.line = line.min(TOTAL_LINES - 1);
        self.acquiring = false;
    }

    pub fn pause(&mut self) {
        self.acquiring = false;
    }

    /// Continue automatic advancement from the current line.
    pub fn resume(&mut self) {
        self.acquiring = true;
    }

    /// Back to the initial line, acquiring.
    pub fn reset(&mut self) {
        self.line = self.initial;
        self.acquiring = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn wraps_after_all_lines() {
        for start in [0, 7, TOTAL_LINES / 2, TOTAL_LINES - 1] {
            let mut line = PhaseEncodeLine::new(start);
            for _ in 0..TOTAL_LINES {
                check!(line.get() < TOTAL_LINES);
                line.advance();
            }
            check!(line.get() == start);
        }
    }

    #[test]
    fn last_line_wraps_to_zero() {
        let mut line = PhaseEncodeLine::new(TOTAL_LINES - 1);
        check!(line.advance() == 0);
    }

    #[test]
    fn manual_scrub_pauses_timer() {
        let mut line = PhaseEncodeLine::default();
        check!(line.get() == 16);

        line.set_manual(3);
        check!(!line.is_acquiring());
        check!(!line.on_timer());
        check!(line.get() == 3);

        line.resume();
        check!(line.on_timer());
        check!(line.get() == 4);
    }

    #[test]
    fn pause_keeps_line() {
        let mut line = PhaseEncodeLine::new(5);
        line.on_timer();
        line.pause();
        line.on_timer();
        line.on_timer();
        check!(line.get() == 6);
        line.resume();
        line.on_timer();
        check!(line.get() == 7);
    }

    #[test]
    fn out_of_range_is_clamped() {
        check!(PhaseEncodeLine::new(1000).get() == TOTAL_LINES - 1);
        let mut line = PhaseEncodeLine::default();
        line.set_manual(usize::MAX);
        check!(line.get() == TOTAL_LINES - 1);
    }

    #[test]
    fn reset_restores_initial_and_acquisition() {
        let mut line = PhaseEncodeLine::new(9);
        line.set_manual(20);
        line.reset();
        check!(line.get() == 9);
        check!(line.is_acquiring());
    }
}
