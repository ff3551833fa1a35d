use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Sliding-window reply tracker.
///
/// Timestamps are appended only for confirmed replies and pruned lazily
/// before every read, so the log never holds entries older than `window`
/// relative to the instant being queried.
#[derive(Debug)]
pub struct ReplyRateLimiter {
    /// Reply instants, oldest first.
    replies: Mutex<Vec<Instant>>,
    window: Duration,
    max_per_window: usize,
}

impl ReplyRateLimiter {
    pub fn new(max_per_window: u32, window: Duration) -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
            window,
            max_per_window: usize::try_from(max_per_window).unwrap_or(usize::MAX),
        }
    }

    pub fn hourly(max_per_hour: u32) -> Self {
        Self::new(max_per_hour, Duration::from_secs(3600))
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_per_window(&self) -> usize {
        self.max_per_window
    }

    /// Whether another reply fits in the window ending at `now`.
    pub fn can_reply(&self, now: Instant) -> bool {
        self.count(now) < self.max_per_window
    }

    /// Record a confirmed reply at `now`.
    pub fn record_reply(&self, now: Instant) {
        let mut replies = self
            .replies
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        replies.push(now);
    }

    /// Replies within the window ending at `now`.
    pub fn count(&self, now: Instant) -> usize {
        let mut replies = self
            .replies
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let window = self.window;
        replies.retain(|t| now.saturating_duration_since(*t) <= window);
        replies.len()
    }

    pub fn remaining(&self, now: Instant) -> usize {
        self.max_per_window.saturating_sub(self.count(now))
    }
}
