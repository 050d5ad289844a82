//! Clock implementations

use std::time::{SystemTime, UNIX_EPOCH};

use tokio::time::Instant;

use super::ports::Clock;

/// Real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
    }
}

/// Clock that advances with the tokio timer.
///
/// Reads `origin_millis` plus the runtime time elapsed since construction.
/// On a paused runtime this follows auto-advanced time exactly, so tick
/// timestamps land on whole tick intervals.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeClock {
    origin: Instant,
    origin_millis: i64,
}

impl RuntimeClock {
    /// Anchor the clock at the given epoch milliseconds.
    pub fn starting_at(origin_millis: i64) -> Self {
        Self { origin: Instant::now(), origin_millis }
    }

    /// Anchor the clock at the current wall-clock time.
    pub fn new() -> Self {
        Self::starting_at(SystemClock.now_millis())
    }
}

impl Default for RuntimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for RuntimeClock {
    fn now_millis(&self) -> i64 {
        let elapsed = i64::try_from(self.origin.elapsed().as_millis()).unwrap_or(i64::MAX);
        self.origin_millis.saturating_add(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }

    #[tokio::test(start_paused = true)]
    async fn runtime_clock_follows_paused_time() {
        let clock = RuntimeClock::starting_at(0);
        assert_eq!(clock.now_millis(), 0);

        tokio::time::advance(Duration::from_millis(1_500)).await;
        assert_eq!(clock.now_millis(), 1_500);
    }
}
