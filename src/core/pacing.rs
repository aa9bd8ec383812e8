//! Fixed-interval gate for outbound price lookups.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Enforces a minimum interval between consecutive network calls so the
/// upstream source's per-caller rate limit is respected.
///
/// `acquire` holds the lock across the sleep, so concurrent callers
/// serialize and the aggregate request rate matches the sequential rate.
pub struct RequestPacer {
    interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_call: Mutex::new(None),
        }
    }

    /// A pacer that never waits, for tests and offline runs.
    pub fn unthrottled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Waits out the remainder of the pacing interval since the previous
    /// call, then records this call.
    pub async fn acquire(&self) {
        if self.interval.is_zero() {
            return;
        }
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                let wait = self.interval - elapsed;
                debug!("Pacing: waiting {wait:?} before next lookup");
                tokio::time::sleep(wait).await;
            }
        }
        *last_call = Some(Instant::now());
    }
}
