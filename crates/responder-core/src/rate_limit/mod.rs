//! Client-side request rate limiting.
//!
//! # Module Structure
//!
//! - `limiter`: Sliding-window limiter persisted in the key-value store
//! - `clock`: Time source abstraction (`SystemClock`, `ManualClock`)

mod clock;
mod limiter;

pub use clock::{Clock, ManualClock, SystemClock};
pub use limiter::{
    DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_MS, RateLimitConfig, RateLimitDecision, RateLimiter,
};
