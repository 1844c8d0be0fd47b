//! Retry state for provider calls
//!
//! Immutable value tracking the current attempt and the delay to wait before
//! the next one. Transitions produce a new state, so the orchestrator can log
//! the state it acted on without interior mutation.

use std::time::Duration;

/// Exponential backoff state. Attempt numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    attempt: u32,
    delay: Duration,
    max_attempts: u32,
    max_delay: Duration,
}

impl RetryState {
    /// Start at attempt 1 with the initial delay.
    pub fn new(initial_delay: Duration, max_delay: Duration, max_attempts: u32) -> Self {
        Self {
            attempt: 1,
            delay: initial_delay,
            max_attempts,
            max_delay,
        }
    }

    /// The attempt this state represents (1-based).
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Delay to sleep before the next attempt.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// True when this attempt is the last one allowed.
    pub fn is_exhausted(&self) -> bool {
        self.attempt >= self.max_attempts
    }

    /// Advance to the next attempt, doubling the delay up to the cap.
    pub fn next(self) -> Self {
        let doubled = self.delay.saturating_mul(2);
        Self {
            attempt: self.attempt + 1,
            delay: doubled.min(self.max_delay),
            ..self
        }
    }
}
