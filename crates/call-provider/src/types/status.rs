//! Call status types returned by the provider.

use std::fmt;

use serde::Deserialize;

/// Lifecycle status of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    Queued,
    Ringing,
    InProgress,
    Completed,
    Failed,
    Busy,
    NoAnswer,
    Canceled,
    /// Any status string this client does not know about.
    #[serde(other)]
    Unknown,
}

impl CallStatus {
    /// Whether the call ended without anyone picking up.
    pub fn is_unanswered_terminal(&self) -> bool {
        matches!(
            self,
            CallStatus::Failed | CallStatus::Busy | CallStatus::NoAnswer | CallStatus::Canceled
        )
    }

    /// Provider spelling of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Queued => "queued",
            CallStatus::Ringing => "ringing",
            CallStatus::InProgress => "in-progress",
            CallStatus::Completed => "completed",
            CallStatus::Failed => "failed",
            CallStatus::Busy => "busy",
            CallStatus::NoAnswer => "no-answer",
            CallStatus::Canceled => "canceled",
            CallStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who or what picked up the call, according to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnsweredBy {
    Human,
    Machine,
    Fax,
    /// Detection ran but gave a result we cannot place, including `unknown`.
    Unrecognised,
}

impl AnsweredBy {
    /// Parse the provider's `answered_by` value.
    ///
    /// All `machine_*` detection results collapse to [`AnsweredBy::Machine`].
    /// A blank value means detection did not run and yields `None`; any other
    /// value, `unknown` included, is [`AnsweredBy::Unrecognised`].
    pub fn from_provider(value: &str) -> Option<Self> {
        match value.trim() {
            "" => None,
            "human" => Some(AnsweredBy::Human),
            "fax" => Some(AnsweredBy::Fax),
            v if v == "machine" || v.starts_with("machine_") => Some(AnsweredBy::Machine),
            _ => Some(AnsweredBy::Unrecognised),
        }
    }
}

impl fmt::Display for AnsweredBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnsweredBy::Human => write!(f, "human"),
            AnsweredBy::Machine => write!(f, "machine"),
            AnsweredBy::Fax => write!(f, "fax"),
            AnsweredBy::Unrecognised => write!(f, "unrecognised"),
        }
    }
}

/// Call resource as returned by the REST API. Only the fields we read.
#[derive(Debug, Clone, Deserialize)]
pub struct CallResource {
    pub sid: String,
    pub status: CallStatus,
    /// Seconds, sent as a string; null until the call completes.
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub answered_by: Option<String>,
}

/// A point-in-time view of one call's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStatusSnapshot {
    /// Call identifier.
    pub sid: String,
    /// Current status.
    pub status: CallStatus,
    /// Billed duration; only reported once the call has completed.
    pub duration_secs: Option<u64>,
    /// Answering-party classification, when machine detection ran.
    pub answered_by: Option<AnsweredBy>,
}

impl CallStatusSnapshot {
    /// Create a snapshot with only a status.
    pub fn new(sid: impl Into<String>, status: CallStatus) -> Self {
        Self {
            sid: sid.into(),
            status,
            duration_secs: None,
            answered_by: None,
        }
    }

    /// Create a `completed` snapshot with the given duration.
    pub fn completed(sid: impl Into<String>, duration_secs: u64) -> Self {
        Self {
            duration_secs: Some(duration_secs),
            ..Self::new(sid, CallStatus::Completed)
        }
    }

    /// Set the answering-party classification.
    pub fn with_answered_by(mut self, answered_by: AnsweredBy) -> Self {
        self.answered_by = Some(answered_by);
        self
    }
}

impl From<CallResource> for CallStatusSnapshot {
    fn from(resource: CallResource) -> Self {
        let duration_secs = resource
            .duration
            .as_deref()
            .and_then(|d| d.trim().parse::<u64>().ok());
        let answered_by = resource
            .answered_by
            .as_deref()
            .and_then(AnsweredBy::from_provider);

        Self {
            sid: resource.sid,
            status: resource.status,
            duration_secs,
            answered_by,
        }
    }
}
