//! Reconnect Backoff
//!
//! Delays between stream reopen attempts, and the bookkeeping that keeps at
//! most one reopen pending.

use std::time::Duration;

const INITIAL_DELAY: Duration = Duration::from_secs(1);
const MAX_DELAY: Duration = Duration::from_secs(30);

/// Exponential delay between stream reopen attempts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    attempt: u32,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max,
            attempt: 0,
        }
    }

    /// Delay before the next attempt; doubles each call up to the cap
    pub fn next_delay(&mut self) -> Duration {
        let factor = 2u32.saturating_pow(self.attempt);
        self.attempt = self.attempt.saturating_add(1);
        self.initial.saturating_mul(factor).min(self.max)
    }

    /// Called once the stream is open again
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    #[cfg(test)]
    fn attempts(&self) -> u32 {
        self.attempt
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(INITIAL_DELAY, MAX_DELAY)
    }
}

/// Reopen scheduling for one stream.
///
/// Every way a stream can end (server close, browser give-up, failed
/// reopen) asks for a reopen; only the first request while one is pending
/// gets a delay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconnectSchedule {
    backoff: Backoff,
    pending: bool,
}

impl ReconnectSchedule {
    pub fn new(backoff: Backoff) -> Self {
        Self {
            backoff,
            pending: false,
        }
    }

    /// Delay for a new reopen, or `None` when one is already pending
    pub fn request(&mut self) -> Option<Duration> {
        if self.pending {
            return None;
        }
        self.pending = true;
        Some(self.backoff.next_delay())
    }

    /// The pending reopen is starting now
    pub fn begin_attempt(&mut self) {
        self.pending = false;
    }

    /// The stream is open again
    pub fn connected(&mut self) {
        self.backoff.reset();
    }
}
