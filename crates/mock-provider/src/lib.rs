//! Mock call providers for exercising the escalation flow without a network.
//!
//! This crate provides implementations of the `CallProvider` trait for testing:
//! - `ScriptedProvider` - Replays a scripted status sequence for each placed call
//! - `DelayedProvider` - Wraps another provider with artificial latency
//!
//! # Example
//!
//! ```rust
//! use mock_provider::{CallProvider, CallRequest, CallScript, ScriptedProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), call_provider::ProviderError> {
//!     let provider = ScriptedProvider::new().with_call(CallScript::no_answer());
//!
//!     let placed = provider
//!         .place_call(CallRequest::new("+15551234567", "+15550000000", "https://x.test/voice"))
//!         .await?;
//!     let snapshot = provider.fetch_status(&placed.sid).await?;
//!     println!("{} -> {}", placed.sid, snapshot.status);
//!     Ok(())
//! }
//! ```

mod delayed;
mod scripted;

pub use call_provider::{
    async_trait, AnsweredBy, CallProvider, CallRequest, CallStatus, CallStatusSnapshot,
    PlacedCall, ProviderError,
};

pub use delayed::DelayedProvider;
pub use scripted::{CallScript, ScriptStep, ScriptedProvider};
