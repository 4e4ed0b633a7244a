//! Request rate limiting.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};
use tracing::trace;

/// Sliding-window rate limiter shared by every request a client issues.
///
/// Remembers the instants of the last `max_requests` grants. A new grant is
/// handed out only while fewer than `max_requests` grants fall inside the
/// trailing window, so no window of that length ever sees more. Waiters queue
/// on a fair mutex and are released in arrival order.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    grants: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Create a limiter allowing `requests_per_second` grants per second.
    ///
    /// A value of zero is treated as one.
    #[must_use]
    pub fn new(requests_per_second: u32) -> Self {
        Self::with_window(requests_per_second as usize, Duration::from_secs(1))
    }

    /// Create a limiter allowing `max_requests` grants per `window`.
    #[must_use]
    pub fn with_window(max_requests: usize, window: Duration) -> Self {
        let max_requests = max_requests.max(1);
        Self {
            max_requests,
            window,
            grants: Mutex::new(VecDeque::with_capacity(max_requests)),
        }
    }

    /// Maximum grants per window.
    #[must_use]
    pub const fn max_requests(&self) -> usize {
        self.max_requests
    }

    /// Length of the sliding window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Wait until a request may be issued, then record the grant.
    pub async fn acquire(&self) {
        let mut grants = self.grants.lock().await;
        loop {
            let now = Instant::now();
            while grants
                .front()
                .is_some_and(|&granted| now.duration_since(granted) >= self.window)
            {
                grants.pop_front();
            }

            if grants.len() < self.max_requests {
                grants.push_back(now);
                return;
            }

            if let Some(&oldest) = grants.front() {
                let ready_at = oldest + self.window;
                trace!(wait = ?ready_at.duration_since(now), "Rate limit reached, waiting");
                sleep_until(ready_at).await;
            }
        }
    }
}
