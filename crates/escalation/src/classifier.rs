//! Answer detection for a single call.
//!
//! The provider's own answering-party detection is slow and often missing, so
//! the verdict combines three signals: how long the call has been
//! continuously `in-progress`, the final billed duration, and `answered_by`.

use std::time::Duration;

use call_provider::{AnsweredBy, CallStatus, CallStatusSnapshot};

/// Decision after observing one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Not enough evidence yet.
    ContinuePolling,
    /// A person picked up.
    Answered,
    /// Nobody (or only a machine) picked up.
    NotAnswered,
}

impl Verdict {
    /// Whether polling can stop.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Verdict::ContinuePolling)
    }

    /// `Some(answered)` for terminal verdicts.
    pub fn answered(&self) -> Option<bool> {
        match self {
            Verdict::ContinuePolling => None,
            Verdict::Answered => Some(true),
            Verdict::NotAnswered => Some(false),
        }
    }
}

/// Thresholds used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierThresholds {
    /// Continuous `in-progress` time that counts as a human pickup.
    pub sustained_in_progress: Duration,
    /// Minimum billed duration for a completed call to count as answered.
    pub min_completed_duration_secs: u64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            sustained_in_progress: Duration::from_secs(10),
            min_completed_duration_secs: 15,
        }
    }
}

/// Per-call state carried between observations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorState {
    /// Monitor time at which the current `in-progress` streak began.
    pub in_progress_since: Option<Duration>,
}

/// Incremental answer classifier for one call attempt.
#[derive(Debug, Clone, Default)]
pub struct AnswerClassifier {
    thresholds: ClassifierThresholds,
    state: MonitorState,
}

impl AnswerClassifier {
    /// Create a classifier with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with custom thresholds.
    pub fn with_thresholds(thresholds: ClassifierThresholds) -> Self {
        Self {
            thresholds,
            state: MonitorState::default(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Observe the latest snapshot, taken `elapsed` after monitoring began.
    ///
    /// Rules are checked in order: sustained `in-progress`, then `completed`,
    /// then the unanswered terminal statuses. Anything else keeps polling.
    pub fn observe(&mut self, snapshot: &CallStatusSnapshot, elapsed: Duration) -> Verdict {
        if snapshot.status == CallStatus::InProgress {
            return match self.state.in_progress_since {
                None => {
                    self.state.in_progress_since = Some(elapsed);
                    Verdict::ContinuePolling
                }
                Some(since) if elapsed.saturating_sub(since) >= self.thresholds.sustained_in_progress => {
                    Verdict::Answered
                }
                Some(_) => Verdict::ContinuePolling,
            };
        }

        // Any other status breaks the streak.
        self.state.in_progress_since = None;

        match snapshot.status {
            CallStatus::Completed => self.classify_completed(snapshot),
            status if status.is_unanswered_terminal() => Verdict::NotAnswered,
            _ => Verdict::ContinuePolling,
        }
    }

    fn classify_completed(&self, snapshot: &CallStatusSnapshot) -> Verdict {
        let duration = snapshot.duration_secs.unwrap_or(0);
        if duration < self.thresholds.min_completed_duration_secs {
            return Verdict::NotAnswered;
        }

        match snapshot.answered_by {
            Some(AnsweredBy::Human) | None => Verdict::Answered,
            Some(AnsweredBy::Machine | AnsweredBy::Fax | AnsweredBy::Unrecognised) => {
                Verdict::NotAnswered
            }
        }
    }
}

/// Classify a full timed history, stopping at the first terminal verdict.
pub fn classify_history<'a, I>(history: I) -> Verdict
where
    I: IntoIterator<Item = (Duration, &'a CallStatusSnapshot)>,
{
    let mut classifier = AnswerClassifier::new();
    for (elapsed, snapshot) in history {
        let verdict = classifier.observe(snapshot, elapsed);
        if verdict.is_terminal() {
            return verdict;
        }
    }
    Verdict::ContinuePolling
}
