//! Liveness check for the prompt webhooks.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    /// Whether a fallback number is set for DTMF-triggered emergency calls.
    pub emergency_dispatch: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        emergency_dispatch: state.dtmf.dispatch().is_some(),
    })
}
