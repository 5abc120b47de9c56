//! Configuration types for call-provider.

use secrecy::{ExposeSecret, SecretString};

/// Production Twilio API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.twilio.com";

/// API version segment used in every resource URL.
const API_VERSION: &str = "2010-04-01";

/// Credentials and endpoint for the call provider.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Base URL of the REST API (e.g., "https://api.twilio.com").
    pub api_base: String,
    /// Account identifier (the "AC..." SID).
    pub account_sid: String,
    /// Auth token paired with the account.
    auth_token: SecretString,
}

impl ProviderConfig {
    /// Create a configuration against the production API.
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            account_sid: account_sid.into(),
            auth_token: SecretString::from(auth_token.into()),
        }
    }

    /// Point the client at a different API base (proxies, test servers).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Auth token, exposed only for request signing.
    pub(crate) fn auth_token(&self) -> &str {
        self.auth_token.expose_secret()
    }

    /// Check that the credentials are present.
    pub fn validate(&self) -> Result<(), crate::ProviderError> {
        if self.account_sid.trim().is_empty() {
            return Err(crate::ProviderError::Config(
                "account SID is empty".to_string(),
            ));
        }
        if self.auth_token.expose_secret().trim().is_empty() {
            return Err(crate::ProviderError::Config(
                "auth token is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// URL of the calls collection (used to place calls).
    pub fn calls_url(&self) -> String {
        format!(
            "{}/{}/Accounts/{}/Calls.json",
            self.api_base,
            API_VERSION,
            urlencoding::encode(&self.account_sid)
        )
    }

    /// URL of a single call resource.
    pub fn call_url(&self, call_sid: &str) -> String {
        format!(
            "{}/{}/Accounts/{}/Calls/{}.json",
            self.api_base,
            API_VERSION,
            urlencoding::encode(&self.account_sid),
            urlencoding::encode(call_sid)
        )
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_base", &self.api_base)
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[REDACTED]")
            .finish()
    }
}
