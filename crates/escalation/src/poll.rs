//! Fixed-interval polling with a bounded total wait.

use std::time::Duration;

use tokio::time::{sleep, Instant};

/// Default time between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Default upper bound on a polling session.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(30);

/// How often to poll and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    /// Sleep between consecutive polls.
    pub interval: Duration,
    /// No poll starts once this much time has passed.
    pub max_wait: Duration,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}

impl PollSchedule {
    /// Create a schedule.
    pub fn new(interval: Duration, max_wait: Duration) -> Self {
        Self { interval, max_wait }
    }

    /// Same interval, different bound.
    pub fn with_max_wait(self, max_wait: Duration) -> Self {
        Self { max_wait, ..self }
    }

    /// Start a polling session now.
    pub fn start(self) -> PollTicker {
        PollTicker {
            schedule: self,
            started: Instant::now(),
            ticks: 0,
        }
    }
}

/// A running polling session.
///
/// ```
/// use std::time::Duration;
/// use escalation::PollSchedule;
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let mut ticker = PollSchedule::new(Duration::from_secs(2), Duration::from_secs(5)).start();
/// let mut polls = 0;
/// while let Some(_elapsed) = ticker.tick().await {
///     polls += 1;
/// }
/// assert_eq!(polls, 3);
/// # }
/// ```
#[derive(Debug)]
pub struct PollTicker {
    schedule: PollSchedule,
    started: Instant,
    ticks: u32,
}

impl PollTicker {
    /// Wait for the next poll slot.
    ///
    /// The first call returns immediately; later calls sleep one interval.
    /// Returns the time elapsed since the session started, or `None` once
    /// the maximum wait has been used up.
    pub async fn tick(&mut self) -> Option<Duration> {
        if self.ticks > 0 {
            sleep(self.schedule.interval).await;
        }
        self.ticks += 1;

        let elapsed = self.started.elapsed();
        if elapsed >= self.schedule.max_wait {
            None
        } else {
            Some(elapsed)
        }
    }

    /// Number of poll slots handed out so far (including a final `None`).
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Time since the session started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
