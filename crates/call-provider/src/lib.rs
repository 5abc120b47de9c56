//! Twilio voice call client library.
//!
//! This crate provides a Rust client for placing outbound phone calls and
//! querying their progress through the Twilio REST API. It supports:
//!
//! - Placing a call that fetches its spoken script from a webhook URL
//! - Fetching a fresh status snapshot for a placed call
//! - The [`CallProvider`] trait, so callers can swap in test doubles
//!
//! # Example
//!
//! ```no_run
//! use call_provider::{CallProvider, CallRequest, ProviderConfig, TwilioClient};
//!
//! # async fn example() -> Result<(), call_provider::ProviderError> {
//! let config = ProviderConfig::new("AC123", "secret");
//! let client = TwilioClient::new(config)?;
//!
//! let placed = client
//!     .place_call(CallRequest::new(
//!         "+15551234567",
//!         "+15557654321",
//!         "https://example.ngrok.app/voice",
//!     ))
//!     .await?;
//!
//! let snapshot = client.fetch_status(&placed.sid).await?;
//! println!("{} is {}", snapshot.sid, snapshot.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod types;

pub use client::TwilioClient;
pub use config::{ProviderConfig, DEFAULT_API_BASE};
pub use error::ProviderError;
pub use provider::{async_trait, CallProvider};
pub use types::*;
