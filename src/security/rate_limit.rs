//! Fixed-window in-memory rate limiter.

use std::collections::HashMap;
use std::time::{Duration, Instant};

const DEFAULT_WINDOW: Duration = Duration::from_secs(900);
const DEFAULT_MAX_REQUESTS: usize = 100;

/// Per-identifier fixed-window rate limiter.
///
/// Timestamps outside the window are pruned on every call, so memory stays
/// proportional to recent activity.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: usize,
    requests: HashMap<String, Vec<Instant>>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            window,
            max_requests,
            requests: HashMap::new(),
        }
    }

    /// Record a request for `identifier` and report whether it is allowed.
    pub fn is_allowed(&mut self, identifier: &str) -> bool {
        let now = Instant::now();
        let window = self.window;

        let timestamps = self.requests.entry(identifier.to_string()).or_default();
        timestamps.retain(|t| now.duration_since(*t) < window);

        if timestamps.len() >= self.max_requests {
            return false;
        }

        timestamps.push(now);
        true
    }

    /// Requests left in the current window for `identifier`.
    pub fn remaining(&mut self, identifier: &str) -> usize {
        let now = Instant::now();
        let window = self.window;

        match self.requests.get_mut(identifier) {
            Some(timestamps) => {
                timestamps.retain(|t| now.duration_since(*t) < window);
                self.max_requests.saturating_sub(timestamps.len())
            }
            None => self.max_requests,
        }
    }
}

impl Default for RateLimiter {
    /// 100 requests per 15 minutes.
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_MAX_REQUESTS)
    }
}
