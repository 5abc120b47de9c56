//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use call_provider::{ProviderConfig, DEFAULT_API_BASE};
use escalation::{EmergencyDispatch, EscalationSettings};
use secrecy::{ExposeSecret, SecretString};

/// Prompt server and alert configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Provider account SID.
    pub account_sid: String,
    /// Provider auth token.
    pub auth_token: SecretString,
    /// Provider API base URL.
    pub api_base: String,
    /// Caller-ID number.
    pub origin_number: Option<String>,
    /// Number alerted first.
    pub primary_number: Option<String>,
    /// Number called when the primary does not answer.
    pub fallback_number: Option<String>,
    /// Externally reachable URL of this server, without trailing slash.
    pub public_base_url: String,
    /// Readings above this trigger the escalation sequence.
    pub temperature_threshold: f64,
    /// Stand-in for a sensor reading.
    pub current_temperature: f64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `PROMPT_SERVER_ADDR` | Server bind address | `0.0.0.0:8001` |
    /// | `TWILIO_ACCOUNT_SID` | Provider account SID | (required) |
    /// | `TWILIO_AUTH_TOKEN` | Provider auth token | (required) |
    /// | `TWILIO_API_BASE` | Provider API base URL | `https://api.twilio.com` |
    /// | `TWILIO_PHONE_NUMBER` | Caller-ID number | (none) |
    /// | `PRIMARY_NUMBER` | Number alerted first | (none) |
    /// | `FALLBACK_NUMBER` | Emergency contact | (none) |
    /// | `PUBLIC_BASE_URL` | Public URL of this server | (required) |
    /// | `TEMPERATURE_THRESHOLD` | Alert threshold | `100` |
    /// | `CURRENT_TEMPERATURE` | Current reading | `105` |
    ///
    /// Missing phone numbers are not an error here; the escalation run
    /// reports them and aborts.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = var("PROMPT_SERVER_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8001".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let account_sid =
            var("TWILIO_ACCOUNT_SID").ok_or(ConfigError::Missing("TWILIO_ACCOUNT_SID"))?;
        let auth_token = var("TWILIO_AUTH_TOKEN")
            .map(SecretString::from)
            .ok_or(ConfigError::Missing("TWILIO_AUTH_TOKEN"))?;

        let api_base = var("TWILIO_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let public_base_url = var("PUBLIC_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or(ConfigError::Missing("PUBLIC_BASE_URL"))?;

        let temperature_threshold = parse_number(&var, "TEMPERATURE_THRESHOLD", 100.0)?;
        let current_temperature = parse_number(&var, "CURRENT_TEMPERATURE", 105.0)?;

        Ok(Self {
            addr,
            account_sid,
            auth_token,
            api_base,
            origin_number: var("TWILIO_PHONE_NUMBER"),
            primary_number: var("PRIMARY_NUMBER"),
            fallback_number: var("FALLBACK_NUMBER"),
            public_base_url,
            temperature_threshold,
            current_temperature,
        })
    }

    /// Provider client configuration.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::new(&self.account_sid, self.auth_token.expose_secret())
            .with_api_base(&self.api_base)
    }

    /// Absolute URL of a prompt route on this server.
    pub fn prompt_url(&self, path: &str) -> String {
        format!("{}{}", self.public_base_url, path)
    }

    /// Settings for the startup escalation run.
    pub fn escalation_settings(&self) -> EscalationSettings {
        EscalationSettings::for_base_url(
            self.primary_number.clone(),
            self.fallback_number.clone(),
            self.origin_number.clone(),
            &self.public_base_url,
        )
    }

    /// Target of the emergency call placed from the digit handler.
    pub fn emergency_dispatch(&self) -> Option<EmergencyDispatch> {
        Some(EmergencyDispatch {
            to: self.fallback_number.clone()?,
            from: self.origin_number.clone()?,
            prompt_url: self.prompt_url(escalation::settings::EMERGENCY_PROMPT_PATH),
        })
    }

    /// Whether the current reading should trigger the alert sequence.
    pub fn temperature_exceeded(&self) -> bool {
        self.current_temperature > self.temperature_threshold
    }
}

fn parse_number<F>(var: &F, key: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidNumber(key)),
        None => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PROMPT_SERVER_ADDR format")]
    InvalidAddr,

    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{0} must be a number")]
    InvalidNumber(&'static str),
}
