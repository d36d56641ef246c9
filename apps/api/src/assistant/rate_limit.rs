//! Per-user fixed-window rate limiting for the assistant route.
//!
//! State is process-local. Expired windows are swept once the table grows
//! past `SWEEP_THRESHOLD` keys so idle users do not accumulate forever.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_MAX_REQUESTS: u32 = 20;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

const SWEEP_THRESHOLD: usize = 10_000;

/// Returned when a user has spent their budget for the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimited {
    pub retry_after_secs: u64,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<Uuid, Window>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn check(&self, user_id: Uuid) -> Result<(), RateLimited> {
        self.check_at(user_id, Instant::now())
    }

    /// Counts one request for `user_id` at `now`.
    pub fn check_at(&self, user_id: Uuid, now: Instant) -> Result<(), RateLimited> {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        if windows.len() >= SWEEP_THRESHOLD && !windows.contains_key(&user_id) {
            let before = windows.len();
            windows.retain(|_, w| now.saturating_duration_since(w.started) < self.window);
            debug!("Rate limiter swept {} expired windows", before - windows.len());
        }

        let window = windows.entry(user_id).or_insert(Window {
            started: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(window.started);
        if elapsed >= self.window {
            *window = Window {
                started: now,
                count: 0,
            };
        }

        if window.count >= self.max_requests {
            let remaining = self.window.saturating_sub(elapsed);
            return Err(RateLimited {
                retry_after_secs: whole_secs_ceil(remaining).max(1),
            });
        }

        window.count += 1;
        Ok(())
    }

    /// Requests left for `user_id` in its current window.
    pub fn remaining(&self, user_id: Uuid) -> u32 {
        self.remaining_at(user_id, Instant::now())
    }

    fn remaining_at(&self, user_id: Uuid, now: Instant) -> u32 {
        let windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        match windows.get(&user_id) {
            Some(w) if now.saturating_duration_since(w.started) < self.window => {
                self.max_requests.saturating_sub(w.count)
            }
            _ => self.max_requests,
        }
    }

    #[cfg(test)]
    fn tracked_users(&self) -> usize {
        self.windows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Rounds up so a client waiting `Retry-After` seconds lands in the next window.
fn whole_secs_ceil(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}
