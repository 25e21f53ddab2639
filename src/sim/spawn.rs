//! Add-ball window with a forced-response countdown
//!
//! Dormant until `elapsed >= next_deadline`, then the window opens and the
//! countdown starts. Adding a ball closes the countdown; the window is
//! re-armed on a later pass. A countdown that has run out with no ball added
//! loses the game.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Session time (ms) at which the next window opens
    pub next_deadline: f64,
    pub window_open: bool,
    /// A ball has already been added during the current window
    pub consumed: bool,
    pub countdown_active: bool,
    /// Milliseconds left to add a ball
    pub countdown_remaining: f32,
}

impl SpawnTimer {
    pub fn new(interval_ms: f32) -> Self {
        Self {
            next_deadline: interval_ms as f64,
            window_open: false,
            consumed: false,
            countdown_active: false,
            countdown_remaining: 0.0,
        }
    }

    /// Open the window if the deadline has passed. Returns true on opening.
    pub fn open_if_due(&mut self, elapsed_ms: f64, countdown_ms: f32) -> bool {
        if self.window_open || elapsed_ms < self.next_deadline {
            return false;
        }
        self.window_open = true;
        self.countdown_active = true;
        self.countdown_remaining = countdown_ms;
        true
    }

    /// Run the countdown down by `dt`
    pub fn count_down(&mut self, dt: f32) {
        if self.countdown_active {
            self.countdown_remaining -= dt;
        }
    }

    /// Countdown ran out and no ball was added
    pub fn expired(&self) -> bool {
        self.countdown_active && self.countdown_remaining <= 0.0
    }

    /// Whether a ball may be added right now
    pub fn can_spawn(&self) -> bool {
        self.window_open && !self.consumed
    }

    /// Record that a ball was added; any remaining countdown is discarded
    pub fn consume(&mut self) {
        self.consumed = true;
        self.countdown_active = false;
        self.countdown_remaining = 0.0;
    }

    /// After a consumed window, schedule the next one. Returns true if re-armed.
    pub fn rearm(&mut self, interval_ms: f32) -> bool {
        if !(self.window_open && self.consumed) {
            return false;
        }
        self.next_deadline += interval_ms as f64;
        self.window_open = false;
        self.consumed = false;
        self.countdown_active = false;
        self.countdown_remaining = 0.0;
        true
    }
}
