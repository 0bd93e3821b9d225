//! Request admission gate for the TMDB API.

use std::time::{Duration, Instant};

/// Default request ceiling (requests per second).
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 50;

/// Fixed-interval admission gate.
///
/// Shared by every request issued through one client. Each admission
/// reserves the next slot, so requests leave at most once per
/// `interval` regardless of how many workers are waiting.
#[derive(Debug)]
pub struct RequestGate {
    /// Minimum spacing between two admitted requests.
    interval: Duration,
    /// Earliest instant the next request may be admitted.
    next_slot: Option<Instant>,
}

impl RequestGate {
    /// Creates a gate with the given minimum interval.
    pub(crate) const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: None,
        }
    }

    /// Creates a gate admitting at most `requests_per_second` requests.
    ///
    /// Zero disables throttling.
    pub(crate) fn per_second(requests_per_second: u32) -> Self {
        let interval = Duration::from_secs(1)
            .checked_div(requests_per_second)
            .unwrap_or(Duration::ZERO);
        Self::new(interval)
    }

    /// Creates a gate with the default ceiling (50 req/s).
    pub(crate) fn default_rate() -> Self {
        Self::per_second(DEFAULT_REQUESTS_PER_SECOND)
    }

    /// Minimum spacing between admitted requests.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits for the next free slot and reserves the following one.
    pub async fn admit(&mut self) {
        if let Some(slot) = self.next_slot {
            let wait = slot.saturating_duration_since(Instant::now());
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
        }

        let admitted = Instant::now();
        self.next_slot = admitted.checked_add(self.interval);
    }
}
