//! Application state shared across handlers.

use std::sync::Arc;

use call_provider::CallProvider;
use escalation::DtmfHandler;

use crate::config::Config;

/// Shared application state.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Public URL of this server, used in prompt callbacks.
    pub base_url: String,
    /// Reacts to digits collected on the `/voice` prompt.
    pub dtmf: DtmfHandler,
}

impl AppState {
    /// Create new application state.
    pub fn new(base_url: impl Into<String>, dtmf: DtmfHandler) -> Self {
        Self {
            base_url: base_url.into(),
            dtmf,
        }
    }

    /// Build state from configuration, sharing the provider client.
    pub fn from_config(config: &Config, provider: Arc<dyn CallProvider>) -> Self {
        let dtmf = DtmfHandler::new(provider, config.emergency_dispatch());
        Self::new(config.public_base_url.clone(), dtmf)
    }
}
