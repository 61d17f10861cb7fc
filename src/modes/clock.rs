//! Variable-rate tick scheduling for the game loop
//!
//! The engine reports a new tick interval after every step, so a fixed
//! `tokio::time::Interval` does not fit. `TickClock` holds a single deadline
//! that the driver re-arms after each tick and clears while the game is
//! paused or over.

use std::time::Duration;
use tokio::time::{Instant, sleep_until};

#[derive(Debug, Default)]
pub struct TickClock {
    deadline: Option<Instant>,
}

impl TickClock {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Schedule the next tick `interval` from now, replacing any earlier deadline
    pub fn arm(&mut self, interval: Duration) {
        self.deadline = Some(Instant::now() + interval);
    }

    /// Stop ticking until the next [`arm`](Self::arm)
    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Resolve at the deadline. Never resolves while disarmed, which keeps the
    /// tick branch of a `select!` quiet.
    pub async fn wait(&self) {
        match self.deadline {
            Some(deadline) => sleep_until(deadline).await,
            None => std::future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn test_wait_fires_at_interval() {
        let mut clock = TickClock::new();
        let start = Instant::now();
        clock.arm(Duration::from_millis(168));

        clock.wait().await;

        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(168));
        assert!(waited < Duration::from_millis(170));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_uses_latest_interval() {
        let mut clock = TickClock::new();
        clock.arm(Duration::from_millis(168));
        clock.wait().await;

        let start = Instant::now();
        clock.arm(Duration::from_millis(80));
        clock.wait().await;

        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(80));
        assert!(waited < Duration::from_millis(82));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarmed_clock_never_fires() {
        let mut clock = TickClock::new();
        clock.arm(Duration::from_millis(100));
        clock.disarm();
        assert!(!clock.is_armed());

        let result = timeout(Duration::from_secs(5), clock.wait()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_new_clock_is_disarmed() {
        let clock = TickClock::new();
        assert!(!clock.is_armed());
    }
}
