//! Types for placing calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::CallStatus;

/// Parameters for placing an outbound call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRequest {
    /// Number to dial.
    #[serde(rename = "To")]
    pub to: String,

    /// Caller-ID number the call originates from.
    #[serde(rename = "From")]
    pub from: String,

    /// Webhook the provider fetches the spoken script from.
    #[serde(rename = "Url")]
    pub url: String,

    /// HTTP method the provider uses against `url`.
    #[serde(rename = "Method")]
    pub method: &'static str,
}

impl CallRequest {
    /// Create a request that fetches its script with POST.
    pub fn new(to: impl Into<String>, from: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            from: from.into(),
            url: url.into(),
            method: "POST",
        }
    }
}

/// Result of a successful placement.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacedCall {
    /// Provider-assigned call identifier.
    pub sid: String,

    /// Status at the time of placement (normally `queued`).
    #[serde(default = "queued")]
    pub status: CallStatus,
}

fn queued() -> CallStatus {
    CallStatus::Queued
}

/// One placed call, as tracked by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallAttempt {
    /// Provider-assigned call identifier.
    pub sid: String,
    /// Number that was dialed.
    pub to: String,
    /// Caller-ID number used.
    pub from: String,
    /// When the placement was acknowledged.
    pub placed_at: DateTime<Utc>,
}

impl CallAttempt {
    /// Record a placement made for `request`.
    pub fn new(placed: &PlacedCall, request: &CallRequest) -> Self {
        Self {
            sid: placed.sid.clone(),
            to: request.to.clone(),
            from: request.from.clone(),
            placed_at: Utc::now(),
        }
    }
}
