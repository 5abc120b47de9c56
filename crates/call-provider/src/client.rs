//! Twilio REST API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::provider::CallProvider;
use crate::types::{CallRequest, CallResource, CallStatusSnapshot, PlacedCall};

/// Error document returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: i64,
    message: String,
}

/// Client for the Twilio voice call API.
#[derive(Clone)]
pub struct TwilioClient {
    http: Client,
    config: ProviderConfig,
}

impl TwilioClient {
    /// Build a client for the given account.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        config.validate()?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(ProviderError::Http)?;

        Ok(Self { http, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Read a success body as JSON.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Turn a non-success response into an API error.
    async fn api_error(response: Response) -> ProviderError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(err) => ProviderError::Api {
                status,
                code: err.code,
                message: err.message,
            },
            Err(_) => ProviderError::Api {
                status,
                code: 0,
                message: body,
            },
        }
    }
}

#[async_trait]
impl CallProvider for TwilioClient {
    async fn place_call(&self, request: CallRequest) -> Result<PlacedCall, ProviderError> {
        let url = self.config.calls_url();
        debug!(to = %request.to, url = %request.url, "Placing call");

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(self.config.auth_token()))
            .form(&request)
            .send()
            .await
            .map_err(ProviderError::Http)?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let placed: PlacedCall = Self::decode(response).await?;
        info!(call_sid = %placed.sid, to = %request.to, "Call placed");
        Ok(placed)
    }

    async fn fetch_status(&self, call_sid: &str) -> Result<CallStatusSnapshot, ProviderError> {
        let url = self.config.call_url(call_sid);

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.config.account_sid, Some(self.config.auth_token()))
            .send()
            .await
            .map_err(ProviderError::Http)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::UnknownCall(call_sid.to_string()));
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let resource: CallResource = Self::decode(response).await?;
        debug!(call_sid = %resource.sid, status = %resource.status, "Fetched call status");
        Ok(resource.into())
    }

    fn name(&self) -> &str {
        "twilio"
    }
}

impl std::fmt::Debug for TwilioClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioClient")
            .field("config", &self.config)
            .finish()
    }
}
