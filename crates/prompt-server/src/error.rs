//! Error types for the startup alert.

use call_provider::ProviderError;
use escalation::EscalationError;
use thiserror::Error;

/// Errors that can occur while dispatching the startup alert.
#[derive(Debug, Error)]
pub enum AlertError {
    /// The escalation run stopped on a failed placement.
    #[error("Escalation error: {0}")]
    Escalation(#[from] EscalationError),

    /// The single prompt call could not be placed.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A number needed for the prompt call is not configured.
    #[error("{0} is not configured")]
    MissingNumber(&'static str),
}

/// Result type for alert operations.
pub type Result<T> = std::result::Result<T, AlertError>;
