//! Escalation engine for SafeHouse alert calls.
//!
//! This crate decides whether an outbound call was answered by a person and
//! drives the retry/escalation sequence around it. It provides:
//!
//! - [`AnswerClassifier`] - Turns status snapshots into an answered/not-answered verdict
//! - [`CallMonitor`] - Polls one call until the classifier decides or the wait runs out
//! - [`EscalationController`] - Calls the primary contact twice, then the fallback contact
//! - [`DtmfHandler`] - Reacts to the digit collected during a live call
//!
//! Every component takes the same [`CallProvider`] instance explicitly.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use call_provider::{ProviderConfig, TwilioClient};
//! use escalation::{EscalationController, EscalationSettings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TwilioClient::new(ProviderConfig::new("AC123", "secret"))?;
//! let settings = EscalationSettings::for_base_url(
//!     Some("+15551234567".to_string()),
//!     Some("+15559876543".to_string()),
//!     Some("+15550000000".to_string()),
//!     "https://example.ngrok.app",
//! );
//!
//! let controller = EscalationController::new(Arc::new(client), settings);
//! let outcome = controller.run().await?;
//! println!("Escalation finished: {}", outcome);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod controller;
pub mod dtmf;
pub mod error;
pub mod monitor;
pub mod poll;
pub mod settings;

pub use call_provider::CallProvider;
pub use classifier::{AnswerClassifier, ClassifierThresholds, MonitorState, Verdict};
pub use controller::{
    EscalationController, EscalationOutcome, EscalationState, EscalationTimings, PrimaryAttempt,
};
pub use dtmf::{DtmfHandler, DtmfResponse, EmergencyDispatch, ACKNOWLEDGE_DIGIT};
pub use error::{CallStage, ConfigurationError, EscalationError};
pub use monitor::CallMonitor;
pub use poll::{PollSchedule, PollTicker};
pub use settings::{EscalationPlan, EscalationSettings};
