//! Delayed provider - wraps another provider with artificial latency.

use std::time::Duration;

use async_trait::async_trait;
use call_provider::{CallProvider, CallRequest, CallStatusSnapshot, PlacedCall, ProviderError};
use tokio::time::sleep;

/// A provider that wraps another provider and delays every operation.
///
/// Useful for checking that callers do not wait on fire-and-forget placements.
pub struct DelayedProvider<P: CallProvider> {
    inner: P,
    delay: Duration,
}

impl<P: CallProvider> DelayedProvider<P> {
    /// Wrap `inner`, delaying each call by `delay`.
    pub fn new(inner: P, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Wrap `inner` with a delay in seconds.
    pub fn with_secs(inner: P, secs: u64) -> Self {
        Self::new(inner, Duration::from_secs(secs))
    }

    /// Get the wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: CallProvider> CallProvider for DelayedProvider<P> {
    async fn place_call(&self, request: CallRequest) -> Result<PlacedCall, ProviderError> {
        sleep(self.delay).await;
        self.inner.place_call(request).await
    }

    async fn fetch_status(&self, call_sid: &str) -> Result<CallStatusSnapshot, ProviderError> {
        sleep(self.delay).await;
        self.inner.fetch_status(call_sid).await
    }

    fn name(&self) -> &str {
        "DelayedProvider"
    }
}
