//! The trait every call provider implementation satisfies.

pub use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{CallRequest, CallStatusSnapshot, PlacedCall};

/// Places outbound calls and reports on their progress.
///
/// Implementations hold no per-call state: every `fetch_status` returns a
/// fresh snapshot straight from the provider.
#[async_trait]
pub trait CallProvider: Send + Sync {
    /// Place an outbound call.
    async fn place_call(&self, request: CallRequest) -> Result<PlacedCall, ProviderError>;

    /// Fetch the current status of a placed call.
    async fn fetch_status(&self, call_sid: &str) -> Result<CallStatusSnapshot, ProviderError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
