//! Route handlers for the prompt server.
//!
//! The call provider fetches these documents mid-call; every prompt route
//! answers both GET and POST.

pub mod gather;
pub mod health;
pub mod prompts;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Path of the interactive prompt.
pub const VOICE_PATH: &str = "/voice";
/// Path the interactive prompt posts collected digits to.
pub const GATHER_PATH: &str = "/gather";
/// Emergency notification and temperature alert prompts live where the
/// escalation run points its calls.
pub use escalation::settings::{
    ALERT_PROMPT_PATH as TEMPERATURE_ALERT_PATH, EMERGENCY_PROMPT_PATH as EMERGENCY_PATH,
};

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Spoken-script documents
        .route(VOICE_PATH, get(prompts::voice).post(prompts::voice))
        .route(
            GATHER_PATH,
            get(gather::gather_query).post(gather::gather_form),
        )
        .route(
            EMERGENCY_PATH,
            get(prompts::emergency).post(prompts::emergency),
        )
        .route(
            TEMPERATURE_ALERT_PATH,
            get(prompts::temperature_alert).post(prompts::temperature_alert),
        )
        // Health check
        .route("/health", get(health::health))
}
