//! Scripted provider - each placed call replays a predefined status sequence.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use call_provider::{
    AnsweredBy, CallProvider, CallRequest, CallStatus, CallStatusSnapshot, PlacedCall,
    ProviderError,
};

/// One response to a status poll.
#[derive(Debug, Clone)]
pub enum ScriptStep {
    /// Report this status.
    Status {
        status: CallStatus,
        duration_secs: Option<u64>,
        answered_by: Option<AnsweredBy>,
    },
    /// Fail the poll with a provider error.
    Error,
}

impl ScriptStep {
    /// A step reporting only a status.
    pub fn status(status: CallStatus) -> Self {
        ScriptStep::Status {
            status,
            duration_secs: None,
            answered_by: None,
        }
    }

    /// A `completed` step.
    pub fn completed(duration_secs: u64, answered_by: Option<AnsweredBy>) -> Self {
        ScriptStep::Status {
            status: CallStatus::Completed,
            duration_secs: Some(duration_secs),
            answered_by,
        }
    }
}

/// The status sequence for one call.
///
/// Each poll consumes one step; the last step repeats once the script runs out.
#[derive(Debug, Clone)]
pub struct CallScript {
    steps: Vec<ScriptStep>,
}

impl CallScript {
    /// Script from explicit steps.
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self { steps }
    }

    /// Rings once, then reports `no-answer`.
    pub fn no_answer() -> Self {
        Self::new(vec![
            ScriptStep::status(CallStatus::Ringing),
            ScriptStep::status(CallStatus::NoAnswer),
        ])
    }

    /// Rings once, then stays `in-progress` for as long as it is polled.
    pub fn picked_up() -> Self {
        Self::new(vec![
            ScriptStep::status(CallStatus::Ringing),
            ScriptStep::status(CallStatus::InProgress),
        ])
    }

    /// Rings once, then completes with the given duration and classification.
    pub fn completes_after(duration_secs: u64, answered_by: Option<AnsweredBy>) -> Self {
        Self::new(vec![
            ScriptStep::status(CallStatus::Ringing),
            ScriptStep::completed(duration_secs, answered_by),
        ])
    }

    /// Every poll fails.
    pub fn unreachable() -> Self {
        Self::new(vec![ScriptStep::Error])
    }

    /// Rings forever.
    pub fn ringing() -> Self {
        Self::new(vec![ScriptStep::status(CallStatus::Ringing)])
    }
}

#[derive(Debug, Default)]
struct Inner {
    pending_scripts: VecDeque<CallScript>,
    active: HashMap<String, (CallScript, usize)>,
    placed: Vec<CallRequest>,
    polls: HashMap<String, usize>,
    attempts: usize,
    fail_placement_at: Option<usize>,
}

/// A provider whose calls follow scripts queued in placement order.
///
/// Calls placed after the queued scripts run out ring forever.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    inner: Mutex<Inner>,
}

impl ScriptedProvider {
    /// Create a provider with no scripts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the script for the next placed call.
    pub fn with_call(self, script: CallScript) -> Self {
        self.lock().pending_scripts.push_back(script);
        self
    }

    /// Make the `n`th placement attempt (1-based) fail. Later attempts succeed.
    pub fn fail_placement_at(self, n: usize) -> Self {
        self.lock().fail_placement_at = Some(n);
        self
    }

    /// Every request placed so far, in order.
    pub fn placed_calls(&self) -> Vec<CallRequest> {
        self.lock().placed.clone()
    }

    /// Number of calls placed to `to`.
    pub fn calls_to(&self, to: &str) -> usize {
        self.lock().placed.iter().filter(|r| r.to == to).count()
    }

    /// Number of status polls made for `call_sid`.
    pub fn poll_count(&self, call_sid: &str) -> usize {
        self.lock().polls.get(call_sid).copied().unwrap_or(0)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panicking test thread must not hide the recorded calls from the others.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl CallProvider for ScriptedProvider {
    async fn place_call(&self, request: CallRequest) -> Result<PlacedCall, ProviderError> {
        let mut inner = self.lock();
        inner.attempts += 1;
        let attempt = inner.attempts;

        if inner.fail_placement_at == Some(attempt) {
            return Err(ProviderError::Api {
                status: 500,
                code: 0,
                message: format!("scripted placement failure on call {}", attempt),
            });
        }

        let sid = format!("CA{:032}", attempt);
        let script = inner
            .pending_scripts
            .pop_front()
            .unwrap_or_else(CallScript::ringing);
        inner.active.insert(sid.clone(), (script, 0));
        inner.placed.push(request);

        Ok(PlacedCall {
            sid,
            status: CallStatus::Queued,
        })
    }

    async fn fetch_status(&self, call_sid: &str) -> Result<CallStatusSnapshot, ProviderError> {
        let mut inner = self.lock();
        *inner.polls.entry(call_sid.to_string()).or_insert(0) += 1;

        let (script, cursor) = inner
            .active
            .get_mut(call_sid)
            .ok_or_else(|| ProviderError::UnknownCall(call_sid.to_string()))?;

        let index = (*cursor).min(script.steps.len().saturating_sub(1));
        *cursor += 1;

        match script.steps.get(index) {
            Some(ScriptStep::Status {
                status,
                duration_secs,
                answered_by,
            }) => Ok(CallStatusSnapshot {
                sid: call_sid.to_string(),
                status: *status,
                duration_secs: *duration_secs,
                answered_by: *answered_by,
            }),
            Some(ScriptStep::Error) => Err(ProviderError::Api {
                status: 503,
                code: 0,
                message: "scripted poll failure".to_string(),
            }),
            None => Ok(CallStatusSnapshot::new(call_sid, CallStatus::Queued)),
        }
    }

    fn name(&self) -> &str {
        "ScriptedProvider"
    }
}
