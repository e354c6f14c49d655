use std::time::{Duration, Instant};

/// Two Ctrl+C presses within this window quit
pub const CTRL_C_WINDOW: Duration = Duration::from_secs(2);

/// Double Ctrl+C detection
#[derive(Debug, Clone, Default)]
pub struct ExitState {
    presses: u8,
    last_press: Option<Instant>,
}

impl ExitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press; true when this one should quit
    pub fn record_ctrl_c(&mut self) -> bool {
        self.record_ctrl_c_at(Instant::now())
    }

    fn record_ctrl_c_at(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_press
            && now.duration_since(last) > CTRL_C_WINDOW
        {
            self.presses = 0;
        }

        self.presses = self.presses.saturating_add(1);
        self.last_press = Some(now);
        self.presses >= 2
    }

    pub fn reset(&mut self) {
        self.presses = 0;
        self.last_press = None;
    }
}
