//! Sliding-window request limiter.
//!
//! Accepted requests are recorded as epoch-millisecond timestamps under
//! [`keys::RATE_LIMIT_TIMESTAMPS`]. Stale entries are evicted lazily whenever
//! the list is read; there is no background timer.
//!
//! Checking and recording are separate operations. [`RateLimiter::record_request`]
//! never refuses, so the cap only holds when callers check first.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use super::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::storage::{KeyValueStore, keys};

/// Requests allowed per window by default.
pub const DEFAULT_MAX_REQUESTS: usize = 5;
/// Default window length in milliseconds.
pub const DEFAULT_WINDOW_MS: i64 = 60_000;

/// Largest stored timestamp taken at face value (about the year 294,000).
const MAX_TIMESTAMP_MS: f64 = (i64::MAX / 1_000) as f64;

/// Limit of `max_requests` per rolling window of `window_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window_ms: i64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window_ms: DEFAULT_WINDOW_MS,
        }
    }
}

/// Outcome of [`RateLimiter::check_limit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitDecision {
    pub is_limited: bool,
    /// Milliseconds until the oldest request in the window expires; 0 when not limited.
    pub wait_ms: u64,
}

impl RateLimitDecision {
    pub const ALLOWED: RateLimitDecision = RateLimitDecision {
        is_limited: false,
        wait_ms: 0,
    };
}

/// Client-local sliding-window limiter backed by a [`KeyValueStore`].
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Creates a limiter on the system clock.
    pub fn new(store: Arc<dyn KeyValueStore>, config: RateLimitConfig) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), config)
    }

    pub fn with_clock(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        config: RateLimitConfig,
    ) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Decides whether a new request may be dispatched now.
    ///
    /// Evicted entries are written back so the stored list only holds
    /// timestamps inside the window; a failed write-back is logged and does
    /// not change the decision.
    pub fn check_limit(&self) -> RateLimitDecision {
        let now = self.clock.now_millis();
        let stored = self.load_timestamps();
        let stored_len = stored.len();
        let live = self.within_window(stored, now);

        if live.len() != stored_len {
            if let Err(e) = self.save_timestamps(&live) {
                warn!("Failed to persist pruned rate limit timestamps: {}", e);
            }
        }

        if live.len() >= self.config.max_requests {
            let oldest = live.iter().copied().min().unwrap_or(now);
            let wait_ms = oldest
                .saturating_add(self.config.window_ms)
                .saturating_sub(now)
                .max(0) as u64;
            debug!(
                "Rate limited: {} requests in window, wait {} ms",
                live.len(),
                wait_ms
            );
            return RateLimitDecision {
                is_limited: true,
                wait_ms,
            };
        }

        RateLimitDecision::ALLOWED
    }

    /// Records a request made now.
    ///
    /// Stale entries are dropped in the same write. The cap is not enforced
    /// here; call [`check_limit`](Self::check_limit) first.
    pub fn record_request(&self) -> Result<()> {
        let now = self.clock.now_millis();
        let mut live = self.within_window(self.load_timestamps(), now);
        live.push(now);
        self.save_timestamps(&live)
    }

    /// Timestamps currently counted against the limit.
    pub fn recorded(&self) -> Vec<i64> {
        self.within_window(self.load_timestamps(), self.clock.now_millis())
    }

    fn within_window(&self, timestamps: Vec<i64>, now: i64) -> Vec<i64> {
        let window_start = now.saturating_sub(self.config.window_ms);
        timestamps
            .into_iter()
            .filter(|&ts| ts > window_start)
            .collect()
    }

    /// Reads the stored list; unreadable or corrupt data counts as empty.
    ///
    /// Entries that are not plausible epoch milliseconds are dropped.
    fn load_timestamps(&self) -> Vec<i64> {
        let raw = match self.store.get(keys::RATE_LIMIT_TIMESTAMPS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read rate limit timestamps: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<f64>>(&raw) {
            Ok(values) => values
                .into_iter()
                .filter(|v| v.is_finite() && (0.0..=MAX_TIMESTAMP_MS).contains(v))
                .map(|v| v as i64)
                .collect(),
            Err(e) => {
                warn!("Failed to parse rate limit timestamps: {}", e);
                Vec::new()
            }
        }
    }

    fn save_timestamps(&self, timestamps: &[i64]) -> Result<()> {
        let json = serde_json::to_string(timestamps)?;
        self.store.set(keys::RATE_LIMIT_TIMESTAMPS, &json)
    }
}
