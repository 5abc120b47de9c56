//! Error types for the escalation engine.

use std::fmt;

use call_provider::ProviderError;
use thiserror::Error;

/// A required escalation setting is absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The named setting is missing or blank.
    #[error("{0} is not configured")]
    Missing(&'static str),
}

/// Which call of the escalation sequence an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStage {
    FirstAttempt,
    SecondAttempt,
    Fallback,
}

impl fmt::Display for CallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallStage::FirstAttempt => write!(f, "first call"),
            CallStage::SecondAttempt => write!(f, "second call"),
            CallStage::Fallback => write!(f, "fallback call"),
        }
    }
}

/// Errors that end an escalation run.
#[derive(Debug, Error)]
pub enum EscalationError {
    /// The provider refused or failed to place a call.
    #[error("failed to place {stage}: {source}")]
    Placement {
        stage: CallStage,
        #[source]
        source: ProviderError,
    },
}

impl EscalationError {
    /// Stage at which the run stopped.
    pub fn stage(&self) -> CallStage {
        match self {
            EscalationError::Placement { stage, .. } => *stage,
        }
    }
}
