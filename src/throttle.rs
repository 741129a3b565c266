//! Minimum spacing between requests issued by one client.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};

#[derive(Debug)]
pub(crate) struct Throttle {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Throttle {
    pub(crate) fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    pub(crate) fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the interval since the previous request has passed, then
    /// record the current instant.
    ///
    /// The lock is held while sleeping, so concurrent callers pass the gate
    /// one at a time.
    pub(crate) async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let remaining = self.min_interval - elapsed;
                tracing::trace!(?remaining, "throttling request");
                sleep(remaining).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[tokio::test(start_paused = true)]
    async fn first_request_is_not_delayed() {
        let throttle = Throttle::new(INTERVAL);
        let start = Instant::now();
        throttle.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn back_to_back_requests_are_spaced() {
        let throttle = Throttle::new(INTERVAL);
        throttle.wait().await;
        let start = Instant::now();
        throttle.wait().await;
        assert!(start.elapsed() >= INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn only_the_remainder_is_waited() {
        let throttle = Throttle::new(INTERVAL);
        throttle.wait().await;
        tokio::time::advance(Duration::from_millis(60)).await;
        let start = Instant::now();
        throttle.wait().await;
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(40));
        assert!(waited < INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn no_wait_after_interval_passed() {
        let throttle = Throttle::new(INTERVAL);
        throttle.wait().await;
        tokio::time::advance(INTERVAL * 2).await;
        let start = Instant::now();
        throttle.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_wait_keeps_previous_timestamp() {
        let throttle = Throttle::new(INTERVAL);
        throttle.wait().await;

        let cut_short = tokio::time::timeout(Duration::from_millis(10), throttle.wait()).await;
        assert!(cut_short.is_err());

        let start = Instant::now();
        throttle.wait().await;
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(85), "{waited:?}");
        assert!(waited < Duration::from_millis(95), "{waited:?}");

        let start = Instant::now();
        throttle.wait().await;
        assert!(start.elapsed() >= INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_never_waits() {
        let throttle = Throttle::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..5 {
            throttle.wait().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_are_serialized() {
        let throttle = Arc::new(Throttle::new(INTERVAL));
        let start = Instant::now();
        let tasks: Vec<_> = (0..3)
            .map(|_| {
                let throttle = Arc::clone(&throttle);
                tokio::spawn(async move { throttle.wait().await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }
        assert!(start.elapsed() >= INTERVAL * 2);
    }
}
