//! Login rate limiting.
//!
//! Employee login is throttled per employee name so that guessing a login
//! code is slow regardless of which address the attempts come from.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::{Clock, DefaultClock},
    middleware::NoOpMiddleware,
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::num::NonZeroU32;

type NameRateLimiter<C> =
    GovRateLimiter<String, DefaultKeyedStateStore<String>, C, NoOpMiddleware<<C as Clock>::Instant>>;

/// Per-name login limiter.
///
/// Names come from unauthenticated requests, so the key set is unbounded;
/// [`RateLimiterState::retain_recent`] drops names whose quota has fully
/// replenished.
pub struct RateLimiterState<C: Clock = DefaultClock> {
    limiter: NameRateLimiter<C>,
    attempts_per_minute: u32,
}

impl RateLimiterState {
    /// Returns `None` when `attempts_per_minute` is 0 (limiting disabled).
    pub fn new(attempts_per_minute: u32) -> Option<Self> {
        Self::with_clock(attempts_per_minute, DefaultClock::default())
    }
}

impl<C: Clock> RateLimiterState<C> {
    pub fn with_clock(attempts_per_minute: u32, clock: C) -> Option<Self> {
        let per_minute = NonZeroU32::new(attempts_per_minute)?;
        Some(Self {
            limiter: GovRateLimiter::new(
                Quota::per_minute(per_minute),
                DefaultKeyedStateStore::default(),
                clock,
            ),
            attempts_per_minute,
        })
    }

    pub fn attempts_per_minute(&self) -> u32 {
        self.attempts_per_minute
    }

    /// Records an attempt for `name`. Names are compared trimmed and
    /// case-insensitively.
    ///
    /// Returns the number of seconds to wait when the attempt is refused.
    pub fn check(&self, name: &str) -> Result<(), u64> {
        let key = name.trim().to_lowercase();

        self.limiter.check_key(&key).map_err(|not_until| {
            let wait = not_until.wait_time_from(self.limiter.clock().now());
            wait.as_secs().max(1)
        })
    }

    /// Forgets names that are back at a full quota.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    pub fn tracked_names(&self) -> usize {
        self.limiter.len()
    }
}

impl<C: Clock> std::fmt::Debug for RateLimiterState<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("attempts_per_minute", &self.attempts_per_minute)
            .field("tracked_names", &self.tracked_names())
            .finish()
    }
}

/// 429 response with a `Retry-After` header, in the common failure shape.
pub fn rate_limited_response(retry_after: u64) -> Response {
    let body = json!({
        "success": false,
        "error": "rate_limited",
        "message": "Too many login attempts. Please try again later.",
        "retryAfter": retry_after
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
    response
}
