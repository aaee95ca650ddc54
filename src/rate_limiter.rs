//! Token-bucket rate limiter for pacing Porkbun API calls.
//!
//! Porkbun enforces its query limits per API key, so every collector that hits
//! the same endpoint class must share one limiter instance.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use crate::error_handling::RateLimitCancelled;

/// Token-bucket rate limiter with a burst size of 1.
///
/// Grants one permit per `interval`. The first permit is available
/// immediately; every following permit is issued no earlier than `interval`
/// after the previous one.
///
/// # Behavior
///
/// - Waiters queue on a fair mutex, so permits are issued in FIFO order
/// - A waiter whose `CancellationToken` fires gives up without consuming a permit
/// - Idle time does not accumulate more than one permit
pub struct RateLimiter {
    name: &'static str,
    interval: Duration,
    next_grant: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(name: &'static str, interval: Duration) -> Self {
        RateLimiter {
            name,
            interval,
            next_grant: Mutex::new(None),
        }
    }

    /// Waits for a permit.
    ///
    /// # Errors
    ///
    /// Returns `RateLimitCancelled` if `cancel` fires while waiting, either in
    /// the queue or for the next slot. No permit is consumed in that case.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<(), RateLimitCancelled> {
        let mut next_grant = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(RateLimitCancelled),
            guard = self.next_grant.lock() => guard,
        };

        if let Some(at) = *next_grant {
            if at > Instant::now() {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(RateLimitCancelled),
                    _ = sleep_until(at) => {}
                }
            }
        }

        *next_grant = Some(Instant::now() + self.interval);
        log::trace!("{} rate limiter issued a permit", self.name);
        Ok(())
    }
}
