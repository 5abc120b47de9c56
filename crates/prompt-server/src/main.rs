//! SafeHouse alert caller.
//!
//! Serves the spoken-script prompts the call provider fetches mid-call, and
//! on startup either runs the escalation sequence (reading above threshold)
//! or places one interactive prompt call.

mod alert;
mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use call_provider::{CallProvider, TwilioClient};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::alert::AlertAction;
use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    // One provider client, shared by the escalation run and the handlers
    let provider: Arc<dyn CallProvider> = Arc::new(TwilioClient::new(config.provider_config())?);

    // Build router
    let state = AppState::from_config(&config, provider.clone());
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server before any call is placed, so the first prompt fetch finds it
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, base_url = %config.public_base_url, "Prompt server listening");
    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    match alert::dispatch(&config, provider).await {
        Ok(action) if action.is_failure() => {
            error!("Escalation aborted: configuration incomplete");
            std::process::exit(1);
        }
        Ok(AlertAction::Escalation(outcome)) => info!(outcome = %outcome, "Alert sequence finished"),
        Ok(AlertAction::PromptCall { call_sid }) => info!(call_sid = %call_sid, "Prompt call in flight"),
        Err(e) => {
            error!(error = %e, "Alert failed");
            std::process::exit(1);
        }
    }

    // Calls placed above keep fetching prompts; serve until interrupted
    info!("Serving prompts, press Ctrl-C to stop");
    tokio::select! {
        result = server => {
            result??;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
        }
    }

    Ok(())
}
