//! Call monitor - polls one call until it is known to be answered or not.

use std::sync::Arc;
use std::time::Duration;

use call_provider::CallProvider;
use tracing::{debug, info, warn};

use crate::classifier::{AnswerClassifier, ClassifierThresholds, Verdict};
use crate::poll::{PollSchedule, DEFAULT_POLL_INTERVAL};

/// Watches a placed call and reports whether a person answered it.
///
/// Anything short of a positive answer is reported as not answered: poll
/// failures and running out of time both return `false`, so the caller
/// escalates instead of stalling.
#[derive(Clone)]
pub struct CallMonitor {
    provider: Arc<dyn CallProvider>,
    interval: Duration,
    thresholds: ClassifierThresholds,
}

impl CallMonitor {
    /// Create a monitor polling every two seconds.
    pub fn new(provider: Arc<dyn CallProvider>) -> Self {
        Self {
            provider,
            interval: DEFAULT_POLL_INTERVAL,
            thresholds: ClassifierThresholds::default(),
        }
    }

    /// Set the poll interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the classifier thresholds.
    pub fn with_thresholds(mut self, thresholds: ClassifierThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Poll `call_sid` for at most `max_wait`; `true` if it was answered.
    pub async fn monitor(&self, call_sid: &str, max_wait: Duration) -> bool {
        let mut classifier = AnswerClassifier::with_thresholds(self.thresholds);
        let mut ticker = PollSchedule::new(self.interval, max_wait).start();

        while let Some(elapsed) = ticker.tick().await {
            let snapshot = match self.provider.fetch_status(call_sid).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(call_sid = %call_sid, error = %e, "Error checking call status");
                    return false;
                }
            };

            info!(
                call_sid = %call_sid,
                status = %snapshot.status,
                elapsed_secs = elapsed.as_secs(),
                "Call status"
            );

            match classifier.observe(&snapshot, elapsed) {
                Verdict::Answered => {
                    info!(
                        call_sid = %call_sid,
                        duration = ?snapshot.duration_secs,
                        answered_by = ?snapshot.answered_by,
                        "Call answered"
                    );
                    return true;
                }
                Verdict::NotAnswered => {
                    info!(
                        call_sid = %call_sid,
                        status = %snapshot.status,
                        duration = ?snapshot.duration_secs,
                        answered_by = ?snapshot.answered_by,
                        "Call not answered"
                    );
                    return false;
                }
                Verdict::ContinuePolling => {
                    if let Some(since) = classifier.state().in_progress_since {
                        debug!(
                            call_sid = %call_sid,
                            in_progress_secs = elapsed.saturating_sub(since).as_secs(),
                            "Call in progress, waiting to confirm"
                        );
                    }
                }
            }
        }

        warn!(
            call_sid = %call_sid,
            max_wait_secs = max_wait.as_secs(),
            "Call status check timed out, assuming not answered"
        );
        false
    }
}

impl std::fmt::Debug for CallMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallMonitor")
            .field("provider", &self.provider.name())
            .field("interval", &self.interval)
            .field("thresholds", &self.thresholds)
            .finish()
    }
}
