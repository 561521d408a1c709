use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use crate::domain::{common::RateLimitConfig, rate_limit::entities::RateLimitDecision};

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    hits: u32,
}

#[derive(Debug)]
struct Windows {
    by_client: HashMap<String, Window>,
    last_purge: Instant,
}

/// Fixed-window request counter keyed by client address.
///
/// Every request counts, including rejected ones, so a client that keeps
/// hammering stays blocked until its window ends.
#[derive(Debug)]
pub struct FixedWindowRateLimiter {
    window: Duration,
    max_requests: u32,
    state: Mutex<Windows>,
}

impl FixedWindowRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            window: config.window,
            max_requests: config.max_requests,
            state: Mutex::new(Windows {
                by_client: HashMap::new(),
                last_purge: Instant::now(),
            }),
        }
    }

    pub fn check(&self, client_key: &str) -> RateLimitDecision {
        self.check_at(client_key, Instant::now())
    }

    pub fn check_at(&self, client_key: &str, now: Instant) -> RateLimitDecision {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if now.saturating_duration_since(state.last_purge) >= self.window {
            let window = self.window;
            state
                .by_client
                .retain(|_, w| now.saturating_duration_since(w.started_at) < window);
            state.last_purge = now;
        }

        let entry = state
            .by_client
            .entry(client_key.to_string())
            .or_insert(Window {
                started_at: now,
                hits: 0,
            });

        if now.saturating_duration_since(entry.started_at) >= self.window {
            *entry = Window {
                started_at: now,
                hits: 0,
            };
        }

        entry.hits = entry.hits.saturating_add(1);

        let elapsed = now.saturating_duration_since(entry.started_at);
        RateLimitDecision {
            allowed: entry.hits <= self.max_requests,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(entry.hits),
            reset_after: self.window.saturating_sub(elapsed),
            window: self.window,
        }
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .by_client
            .len()
    }
}
