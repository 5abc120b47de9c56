//! Digit collection callback.

use axum::extract::{Query, State};
use axum::Form;
use escalation::DtmfResponse;
use serde::Deserialize;
use tracing::info;

use crate::routes::prompts::SayHangupTemplate;
use crate::state::AppState;

const ACKNOWLEDGED_MESSAGE: &str = "You pressed 1. Action completed!";
const EMERGENCY_NOTED_MESSAGE: &str = "Emergency noted calling emergency number. Goodbye.";

/// Parameters sent by the provider after a `Gather`.
#[derive(Debug, Default, Deserialize)]
pub struct GatherParams {
    #[serde(rename = "Digits", default)]
    pub digits: String,
}

/// Digits delivered as a query string.
pub async fn gather_query(
    State(state): State<AppState>,
    params: Option<Query<GatherParams>>,
) -> SayHangupTemplate {
    respond(&state, params.map(|Query(p)| p).unwrap_or_default())
}

/// Digits delivered as a form body.
pub async fn gather_form(
    State(state): State<AppState>,
    params: Option<Form<GatherParams>>,
) -> SayHangupTemplate {
    respond(&state, params.map(|Form(p)| p).unwrap_or_default())
}

fn respond(state: &AppState, params: GatherParams) -> SayHangupTemplate {
    info!(digits = %params.digits, "Digits received");

    // The emergency call runs on its own task; the caller hears the
    // hangup prompt without waiting for it.
    match state.dtmf.handle(&params.digits) {
        DtmfResponse::Acknowledged => SayHangupTemplate::new(ACKNOWLEDGED_MESSAGE),
        DtmfResponse::EmergencyDispatched(_) => SayHangupTemplate::new(EMERGENCY_NOTED_MESSAGE),
    }
}
