//! Minimum spacing between remote update attempts

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// Enforces a minimum interval between consecutive remote calls.
#[derive(Debug)]
pub struct RequestPacer {
    spacing: Duration,
    last_call: Option<Instant>,
}

impl RequestPacer {
    pub fn new(spacing: Duration) -> Self {
        Self { spacing, last_call: None }
    }

    /// Wait until at least `spacing` has passed since the previous call,
    /// then mark a new call as started. The first call never waits.
    pub async fn ready(&mut self) {
        if let Some(last) = self.last_call {
            sleep_until(last + self.spacing).await;
        }
        self.last_call = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_call_is_immediate_and_later_calls_are_spaced() {
        let mut pacer = RequestPacer::new(Duration::from_millis(500));
        let start = Instant::now();

        pacer.ready().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        pacer.ready().await;
        assert_eq!(start.elapsed(), Duration::from_millis(500));

        pacer.ready().await;
        assert_eq!(start.elapsed(), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn time_already_spent_counts_towards_spacing() {
        let mut pacer = RequestPacer::new(Duration::from_millis(500));
        pacer.ready().await;
        let start = Instant::now();

        tokio::time::sleep(Duration::from_millis(300)).await;
        pacer.ready().await;
        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_spacing_never_waits() {
        let mut pacer = RequestPacer::new(Duration::ZERO);
        let start = Instant::now();
        pacer.ready().await;
        pacer.ready().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
