//! In-memory fixed-window rate limiter.
//!
//! Good enough for a single-process deployment: the whole service runs in
//! one process and there is no shared cache tier to coordinate through.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::ports::{RateLimitDecision, RateLimiter};

struct WindowState {
    window_start: Instant,
    count: u32,
}

/// Fixed-window counter per key.
pub struct InMemoryRateLimiter {
    window: Duration,
    max_requests: u32,
    states: Mutex<HashMap<String, WindowState>>,
}

impl InMemoryRateLimiter {
    /// Creates a limiter allowing `max_requests` per `window` per key.
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            states: Mutex::new(HashMap::new()),
        }
    }

    fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let mut states = self.states.lock().unwrap();

        // Opportunistic cleanup keeps the map from growing without bound
        if states.len() > 10_000 {
            let window = self.window;
            states.retain(|_, s| now.duration_since(s.window_start) < window);
        }

        let state = states.entry(key.to_string()).or_insert(WindowState {
            window_start: now,
            count: 0,
        });

        if now.duration_since(state.window_start) >= self.window {
            state.window_start = now;
            state.count = 0;
        }

        state.count += 1;
        if state.count > self.max_requests {
            let elapsed = now.duration_since(state.window_start);
            RateLimitDecision::Limited {
                retry_after_secs: self.window.saturating_sub(elapsed).as_secs().max(1),
            }
        } else {
            RateLimitDecision::Allowed
        }
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now())
    }
}
