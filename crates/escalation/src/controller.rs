//! Escalation controller - call the primary contact twice, then the fallback.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use call_provider::{CallAttempt, CallProvider, CallRequest};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::error::{CallStage, EscalationError};
use crate::monitor::CallMonitor;
use crate::poll::DEFAULT_POLL_INTERVAL;
use crate::settings::{EscalationPlan, EscalationSettings};

/// Waits used between and during attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscalationTimings {
    /// Pause after placing a call before polling it.
    pub settle_delay: Duration,
    /// Upper bound on monitoring one primary call.
    pub monitor_wait: Duration,
    /// Time between status polls.
    pub poll_interval: Duration,
}

impl Default for EscalationTimings {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(5),
            monitor_wait: Duration::from_secs(25),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// One of the two calls to the primary contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAttempt {
    First,
    Second,
}

impl PrimaryAttempt {
    fn stage(self) -> CallStage {
        match self {
            PrimaryAttempt::First => CallStage::FirstAttempt,
            PrimaryAttempt::Second => CallStage::SecondAttempt,
        }
    }

    fn number(self) -> u8 {
        match self {
            PrimaryAttempt::First => 1,
            PrimaryAttempt::Second => 2,
        }
    }
}

/// Where an escalation run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationState {
    Idle,
    FirstAttempt,
    SecondAttempt,
    Escalated,
    ResolvedEarly(PrimaryAttempt),
    Aborted,
}

impl EscalationState {
    /// Leave `Idle`: start calling if the configuration is complete.
    pub fn start(self, configured: bool) -> Self {
        match self {
            EscalationState::Idle if configured => EscalationState::FirstAttempt,
            EscalationState::Idle => EscalationState::Aborted,
            other => other,
        }
    }

    /// Advance after a primary attempt resolved.
    pub fn after_attempt(self, answered: bool) -> Self {
        match (self, answered) {
            (EscalationState::FirstAttempt, true) => {
                EscalationState::ResolvedEarly(PrimaryAttempt::First)
            }
            (EscalationState::FirstAttempt, false) => EscalationState::SecondAttempt,
            (EscalationState::SecondAttempt, true) => {
                EscalationState::ResolvedEarly(PrimaryAttempt::Second)
            }
            (EscalationState::SecondAttempt, false) => EscalationState::Escalated,
            (other, _) => other,
        }
    }

    /// The primary attempt this state places, if any.
    pub fn attempt(&self) -> Option<PrimaryAttempt> {
        match self {
            EscalationState::FirstAttempt => Some(PrimaryAttempt::First),
            EscalationState::SecondAttempt => Some(PrimaryAttempt::Second),
            _ => None,
        }
    }

    /// Final outcome for terminal states.
    pub fn outcome(&self) -> Option<EscalationOutcome> {
        match self {
            EscalationState::ResolvedEarly(PrimaryAttempt::First) => {
                Some(EscalationOutcome::ResolvedOnFirstCall)
            }
            EscalationState::ResolvedEarly(PrimaryAttempt::Second) => {
                Some(EscalationOutcome::ResolvedOnSecondCall)
            }
            EscalationState::Escalated => Some(EscalationOutcome::Escalated),
            EscalationState::Aborted => Some(EscalationOutcome::AbortedMisconfiguration),
            _ => None,
        }
    }

    /// Whether the run is over.
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }
}

/// How an escalation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationOutcome {
    ResolvedOnFirstCall,
    ResolvedOnSecondCall,
    Escalated,
    AbortedMisconfiguration,
}

impl EscalationOutcome {
    /// Whether the primary contact picked up.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            EscalationOutcome::ResolvedOnFirstCall | EscalationOutcome::ResolvedOnSecondCall
        )
    }
}

impl fmt::Display for EscalationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EscalationOutcome::ResolvedOnFirstCall => write!(f, "resolved on first call"),
            EscalationOutcome::ResolvedOnSecondCall => write!(f, "resolved on second call"),
            EscalationOutcome::Escalated => write!(f, "escalated to fallback contact"),
            EscalationOutcome::AbortedMisconfiguration => write!(f, "aborted: misconfiguration"),
        }
    }
}

/// Runs the two-attempts-then-escalate sequence.
///
/// Strictly sequential: each call is placed, settled and monitored to a
/// verdict before the next one is considered.
pub struct EscalationController {
    provider: Arc<dyn CallProvider>,
    settings: EscalationSettings,
    timings: EscalationTimings,
}

impl EscalationController {
    /// Create a controller with the default timings.
    pub fn new(provider: Arc<dyn CallProvider>, settings: EscalationSettings) -> Self {
        Self {
            provider,
            settings,
            timings: EscalationTimings::default(),
        }
    }

    /// Override the timings.
    pub fn with_timings(mut self, timings: EscalationTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Get the timings.
    pub fn timings(&self) -> &EscalationTimings {
        &self.timings
    }

    /// Run the escalation sequence to completion.
    ///
    /// Incomplete settings end the run before any call is placed. A failed
    /// placement ends it with an error and nothing is retried.
    pub async fn run(&self) -> Result<EscalationOutcome, EscalationError> {
        let plan = match self.settings.validate() {
            Ok(plan) => Some(plan),
            Err(e) => {
                error!(error = %e, "Escalation aborted before placing any call");
                None
            }
        };

        let monitor = CallMonitor::new(self.provider.clone()).with_interval(self.timings.poll_interval);
        let mut state = EscalationState::Idle.start(plan.is_some());

        loop {
            debug!(state = ?state, "Escalation state");

            if let Some(outcome) = state.outcome() {
                if state == EscalationState::Escalated {
                    if let Some(plan) = &plan {
                        self.call_fallback(plan).await?;
                    }
                }
                info!(outcome = %outcome, "Escalation finished");
                return Ok(outcome);
            }

            let (Some(attempt), Some(plan)) = (state.attempt(), &plan) else {
                return Ok(EscalationOutcome::AbortedMisconfiguration);
            };

            let answered = self.call_primary(plan, attempt, &monitor).await?;
            if !answered {
                match attempt {
                    PrimaryAttempt::First => info!("First call not answered, making second attempt"),
                    PrimaryAttempt::Second => {
                        warn!("Second call not answered, escalating to fallback contact")
                    }
                }
            }
            state = state.after_attempt(answered);
        }
    }

    /// Place one primary call, let it settle, and monitor it.
    async fn call_primary(
        &self,
        plan: &EscalationPlan,
        attempt: PrimaryAttempt,
        monitor: &CallMonitor,
    ) -> Result<bool, EscalationError> {
        info!(attempt = attempt.number(), to = %plan.primary_number, "Placing call to primary contact");

        let request = CallRequest::new(
            &plan.primary_number,
            &plan.origin_number,
            &plan.primary_prompt_url,
        );
        let call = self.place(request, attempt.stage()).await?;

        sleep(self.timings.settle_delay).await;
        let answered = monitor.monitor(&call.sid, self.timings.monitor_wait).await;

        if answered {
            info!(
                attempt = attempt.number(),
                call_sid = %call.sid,
                "Call was answered, no escalation needed"
            );
        }
        Ok(answered)
    }

    /// Place the fallback call. Not monitored.
    async fn call_fallback(&self, plan: &EscalationPlan) -> Result<CallAttempt, EscalationError> {
        let request = CallRequest::new(
            &plan.fallback_number,
            &plan.origin_number,
            &plan.emergency_prompt_url,
        );
        let call = self.place(request, CallStage::Fallback).await?;
        warn!(
            call_sid = %call.sid,
            to = %call.to,
            "Emergency call to fallback contact initiated"
        );
        Ok(call)
    }

    async fn place(
        &self,
        request: CallRequest,
        stage: CallStage,
    ) -> Result<CallAttempt, EscalationError> {
        match self.provider.place_call(request.clone()).await {
            Ok(placed) => {
                let attempt = CallAttempt::new(&placed, &request);
                info!(
                    stage = %stage,
                    call_sid = %attempt.sid,
                    to = %attempt.to,
                    placed_at = %attempt.placed_at,
                    "Call placed"
                );
                Ok(attempt)
            }
            Err(source) => {
                error!(stage = %stage, error = %source, "Error in escalation process");
                Err(EscalationError::Placement { stage, source })
            }
        }
    }
}

impl fmt::Debug for EscalationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EscalationController")
            .field("provider", &self.provider.name())
            .field("settings", &self.settings)
            .field("timings", &self.timings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_requires_configuration() {
        assert_eq!(EscalationState::Idle.start(true), EscalationState::FirstAttempt);
        assert_eq!(EscalationState::Idle.start(false), EscalationState::Aborted);
    }

    #[test]
    fn test_transitions() {
        let s = EscalationState::FirstAttempt;
        assert_eq!(s.after_attempt(true), EscalationState::ResolvedEarly(PrimaryAttempt::First));
        assert_eq!(s.after_attempt(false), EscalationState::SecondAttempt);

        let s = EscalationState::SecondAttempt;
        assert_eq!(s.after_attempt(true), EscalationState::ResolvedEarly(PrimaryAttempt::Second));
        assert_eq!(s.after_attempt(false), EscalationState::Escalated);
    }

    #[test]
    fn test_terminal_states_are_absorbing() {
        for s in [
            EscalationState::Escalated,
            EscalationState::Aborted,
            EscalationState::ResolvedEarly(PrimaryAttempt::First),
        ] {
            assert!(s.is_terminal());
            assert_eq!(s.after_attempt(false), s);
            assert_eq!(s.start(true), s);
        }
    }

    #[test]
    fn test_outcomes() {
        assert_eq!(EscalationState::Idle.outcome(), None);
        assert_eq!(EscalationState::SecondAttempt.outcome(), None);
        assert_eq!(
            EscalationState::ResolvedEarly(PrimaryAttempt::Second).outcome(),
            Some(EscalationOutcome::ResolvedOnSecondCall)
        );
        assert_eq!(
            EscalationState::Aborted.outcome(),
            Some(EscalationOutcome::AbortedMisconfiguration)
        );
    }

    #[test]
    fn test_outcome_display() {
        assert!(EscalationOutcome::ResolvedOnFirstCall.is_resolved());
        assert!(!EscalationOutcome::Escalated.is_resolved());
        assert_eq!(
            EscalationOutcome::Escalated.to_string(),
            "escalated to fallback contact"
        );
    }

    #[test]
    fn test_default_timings() {
        let t = EscalationTimings::default();
        assert_eq!(t.settle_delay, Duration::from_secs(5));
        assert_eq!(t.monitor_wait, Duration::from_secs(25));
        assert_eq!(t.poll_interval, Duration::from_secs(2));
    }
}
