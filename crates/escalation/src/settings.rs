//! Numbers and prompt URLs an escalation run needs.

use crate::error::ConfigurationError;

/// Path of the prompt played on primary alert calls.
pub const ALERT_PROMPT_PATH: &str = "/temperature-alert";

/// Path of the prompt played on emergency calls.
pub const EMERGENCY_PROMPT_PATH: &str = "/emergency";

/// Escalation settings as loaded; any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscalationSettings {
    /// Number called first, up to twice.
    pub primary_number: Option<String>,
    /// Number called when the primary never answers.
    pub fallback_number: Option<String>,
    /// Caller-ID number for every call.
    pub origin_number: Option<String>,
    /// Script URL for the primary calls.
    pub primary_prompt_url: Option<String>,
    /// Script URL for the fallback call.
    pub emergency_prompt_url: Option<String>,
}

impl EscalationSettings {
    /// Settings with the standard prompt paths under `base_url`.
    pub fn for_base_url(
        primary_number: Option<String>,
        fallback_number: Option<String>,
        origin_number: Option<String>,
        base_url: &str,
    ) -> Self {
        let base = base_url.trim_end_matches('/');
        let url = |path: &str| (!base.is_empty()).then(|| format!("{}{}", base, path));

        Self {
            primary_number,
            fallback_number,
            origin_number,
            primary_prompt_url: url(ALERT_PROMPT_PATH),
            emergency_prompt_url: url(EMERGENCY_PROMPT_PATH),
        }
    }

    /// Check that every setting is present and non-blank.
    pub fn validate(&self) -> Result<EscalationPlan, ConfigurationError> {
        Ok(EscalationPlan {
            primary_number: required(&self.primary_number, "primary number")?,
            fallback_number: required(&self.fallback_number, "fallback number")?,
            origin_number: required(&self.origin_number, "origin number")?,
            primary_prompt_url: required(&self.primary_prompt_url, "primary prompt URL")?,
            emergency_prompt_url: required(&self.emergency_prompt_url, "emergency prompt URL")?,
        })
    }
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, ConfigurationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigurationError::Missing(name)),
    }
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationPlan {
    pub primary_number: String,
    pub fallback_number: String,
    pub origin_number: String,
    pub primary_prompt_url: String,
    pub emergency_prompt_url: String,
}
