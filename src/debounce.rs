//! Keystroke debouncing.
//!
//! Collapses bursts of search or filter edits into one fetch issued after the
//! input has been quiet for a fixed period.

use std::time::{Duration, Instant};

/// Deadline-based debouncer polled from the event loop.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Record an input event at `now`, pushing the deadline out.
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Whether an action is waiting for the quiet period to end.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Check the deadline.
    ///
    /// # Returns
    /// * `bool` - True exactly once per burst, at the first poll past the deadline
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending action.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
