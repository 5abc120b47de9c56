//! Handling of the digit collected during a live prompt call.
//!
//! Pressing `1` acknowledges the prompt. Any other input, including no input
//! at all, dispatches a call to the emergency contact in the background.
//! Treating silence as an emergency is a policy choice that still needs
//! confirming with the people who receive those calls.

use std::sync::Arc;

use call_provider::{CallProvider, CallRequest};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// The digit that acknowledges the prompt.
pub const ACKNOWLEDGE_DIGIT: &str = "1";

/// Who to call, from which number, with which script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyDispatch {
    pub to: String,
    pub from: String,
    pub prompt_url: String,
}

/// What the live caller should hear next.
#[derive(Debug)]
pub enum DtmfResponse {
    /// The caller pressed the acknowledge digit.
    Acknowledged,
    /// An emergency call was dispatched. The handle resolves once the
    /// placement attempt has finished; nobody is required to await it.
    EmergencyDispatched(Option<JoinHandle<()>>),
}

impl DtmfResponse {
    /// Whether an emergency call was triggered.
    pub fn is_emergency(&self) -> bool {
        matches!(self, DtmfResponse::EmergencyDispatched(_))
    }
}

/// Reacts to collected DTMF digits.
#[derive(Clone)]
pub struct DtmfHandler {
    provider: Arc<dyn CallProvider>,
    dispatch: Option<EmergencyDispatch>,
}

impl DtmfHandler {
    /// Create a handler that calls `dispatch` on anything but an acknowledgement.
    pub fn new(provider: Arc<dyn CallProvider>, dispatch: Option<EmergencyDispatch>) -> Self {
        Self { provider, dispatch }
    }

    /// The configured emergency target.
    pub fn dispatch(&self) -> Option<&EmergencyDispatch> {
        self.dispatch.as_ref()
    }

    /// Handle the digits collected from the caller.
    ///
    /// Returns immediately. The emergency call, if any, is placed on a
    /// spawned task: best-effort, errors are logged and never propagated.
    /// Must be called from within a tokio runtime.
    pub fn handle(&self, digits: &str) -> DtmfResponse {
        if digits == ACKNOWLEDGE_DIGIT {
            info!("Caller acknowledged the prompt");
            return DtmfResponse::Acknowledged;
        }

        warn!(digits = %digits, "Prompt not acknowledged, dispatching emergency call");

        let Some(dispatch) = self.dispatch.clone() else {
            error!("No emergency contact configured, emergency call skipped");
            return DtmfResponse::EmergencyDispatched(None);
        };

        let provider = self.provider.clone();
        let handle = tokio::spawn(async move {
            let request = CallRequest::new(&dispatch.to, &dispatch.from, &dispatch.prompt_url);
            match provider.place_call(request).await {
                Ok(placed) => {
                    info!(call_sid = %placed.sid, to = %dispatch.to, "Emergency call initiated")
                }
                Err(e) => error!(to = %dispatch.to, error = %e, "Error calling emergency number"),
            }
        });

        DtmfResponse::EmergencyDispatched(Some(handle))
    }
}

impl std::fmt::Debug for DtmfHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DtmfHandler")
            .field("provider", &self.provider.name())
            .field("dispatch", &self.dispatch)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_provider::{DelayedProvider, ScriptedProvider};
    use std::time::Duration;
    use tokio::time::Instant;

    fn dispatch() -> EmergencyDispatch {
        EmergencyDispatch {
            to: "+15552222222".to_string(),
            from: "+15550000000".to_string(),
            prompt_url: "https://safehouse.example/emergency".to_string(),
        }
    }

    #[tokio::test]
    async fn test_acknowledge_places_no_call() {
        let provider = Arc::new(ScriptedProvider::new());
        let handler = DtmfHandler::new(provider.clone(), Some(dispatch()));

        let response = handler.handle("1");
        tokio::task::yield_now().await;

        assert!(matches!(response, DtmfResponse::Acknowledged));
        assert!(provider.placed_calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_digit_dispatches_without_waiting() {
        let provider = Arc::new(DelayedProvider::with_secs(ScriptedProvider::new(), 5));
        let handler = DtmfHandler::new(provider.clone(), Some(dispatch()));

        let start = Instant::now();
        let response = handler.handle("7");
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(provider.inner().placed_calls().is_empty());

        let DtmfResponse::EmergencyDispatched(Some(task)) = response else {
            panic!("expected a dispatched emergency call");
        };
        task.await.unwrap();

        let placed = provider.inner().placed_calls();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].to, "+15552222222");
        assert_eq!(placed[0].url, "https://safehouse.example/emergency");
    }

    #[tokio::test]
    async fn test_no_input_dispatches() {
        let provider = Arc::new(ScriptedProvider::new());
        let handler = DtmfHandler::new(provider.clone(), Some(dispatch()));

        let response = handler.handle("");
        assert!(response.is_emergency());
        if let DtmfResponse::EmergencyDispatched(Some(task)) = response {
            task.await.unwrap();
        }
        assert_eq!(provider.calls_to("+15552222222"), 1);
    }

    #[tokio::test]
    async fn test_placement_error_is_swallowed() {
        let provider = Arc::new(ScriptedProvider::new().fail_placement_at(1));
        let handler = DtmfHandler::new(provider.clone(), Some(dispatch()));

        let DtmfResponse::EmergencyDispatched(Some(task)) = handler.handle("9") else {
            panic!("expected a dispatched emergency call");
        };
        assert!(task.await.is_ok());
        assert!(provider.placed_calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_dispatch_target() {
        let provider = Arc::new(ScriptedProvider::new());
        let handler = DtmfHandler::new(provider.clone(), None);

        let response = handler.handle("2");
        assert!(matches!(response, DtmfResponse::EmergencyDispatched(None)));
        assert!(provider.placed_calls().is_empty());
    }

    #[tokio::test]
    async fn test_multi_digit_input_is_not_acknowledgement() {
        let provider = Arc::new(ScriptedProvider::new());
        let handler = DtmfHandler::new(provider, Some(dispatch()));
        assert!(handler.handle("11").is_emergency());
    }
}
