//! Startup alert: escalate on a high reading, otherwise place the prompt call.

use std::sync::Arc;

use call_provider::{CallProvider, CallRequest};
use escalation::{EscalationController, EscalationOutcome};
use tracing::info;

use crate::config::Config;
use crate::error::{AlertError, Result};
use crate::routes::VOICE_PATH;

/// What the startup alert did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertAction {
    /// The reading exceeded the threshold and the escalation sequence ran.
    Escalation(EscalationOutcome),
    /// The reading was normal; one interactive prompt call was placed.
    PromptCall { call_sid: String },
}

impl AlertAction {
    /// Whether the process should exit with a failure status.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            AlertAction::Escalation(EscalationOutcome::AbortedMisconfiguration)
        )
    }
}

/// Check the reading and act on it.
pub async fn dispatch(config: &Config, provider: Arc<dyn CallProvider>) -> Result<AlertAction> {
    if config.temperature_exceeded() {
        info!(
            temperature = config.current_temperature,
            threshold = config.temperature_threshold,
            "Temperature exceeds threshold, triggering alert sequence"
        );
        let controller = EscalationController::new(provider, config.escalation_settings());
        let outcome = controller.run().await?;
        return Ok(AlertAction::Escalation(outcome));
    }

    let to = config
        .primary_number
        .as_deref()
        .ok_or(AlertError::MissingNumber("PRIMARY_NUMBER"))?;
    let from = config
        .origin_number
        .as_deref()
        .ok_or(AlertError::MissingNumber("TWILIO_PHONE_NUMBER"))?;

    let placed = provider
        .place_call(CallRequest::new(to, from, config.prompt_url(VOICE_PATH)))
        .await?;
    info!(call_sid = %placed.sid, "Prompt call placed");

    Ok(AlertAction::PromptCall {
        call_sid: placed.sid,
    })
}
