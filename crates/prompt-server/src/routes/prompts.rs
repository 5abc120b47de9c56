//! Fixed spoken-script prompts.

use askama::Template;
use axum::extract::State;

use crate::routes::GATHER_PATH;
use crate::state::AppState;

/// Seconds the caller has to press a key.
const GATHER_TIMEOUT_SECS: u32 = 10;

pub(crate) const EMERGENCY_MESSAGE: &str = "This is an emergency call from SafeHouse. \
    The user has triggered an emergency alert. Please check on them immediately.";

pub(crate) const TEMPERATURE_ALERT_MESSAGE: &str = "Alert from SafeHouse. \
    Your home temperature is dangerously high. This may indicate a heatwave or fire. \
    Please check your home immediately.";

/// Interactive prompt that collects one digit.
#[derive(Template)]
#[template(path = "voice.xml")]
pub struct VoiceTemplate {
    pub gather_url: String,
    pub timeout_secs: u32,
}

/// A single announcement followed by a hangup.
#[derive(Template)]
#[template(path = "say_hangup.xml")]
pub struct SayHangupTemplate {
    pub message: String,
}

impl SayHangupTemplate {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Ask the caller to press 1.
pub async fn voice(State(state): State<AppState>) -> VoiceTemplate {
    VoiceTemplate {
        gather_url: format!("{}{}", state.base_url, GATHER_PATH),
        timeout_secs: GATHER_TIMEOUT_SECS,
    }
}

/// Message played to the emergency contact.
pub async fn emergency() -> SayHangupTemplate {
    SayHangupTemplate::new(EMERGENCY_MESSAGE)
}

/// Message played on the temperature alert calls.
pub async fn temperature_alert() -> SayHangupTemplate {
    SayHangupTemplate::new(TEMPERATURE_ALERT_MESSAGE)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use mock_provider::ScriptedProvider;

    use escalation::EscalationSettings;

    use crate::routes::test_support::{app, get, post_form, send, BASE_URL};

    fn provider() -> Arc<ScriptedProvider> {
        Arc::new(ScriptedProvider::new())
    }

    #[tokio::test]
    async fn test_voice_prompt() {
        let (status, content_type, body) = send(app(provider()), get("/voice")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.contains("xml"), "{content_type}");
        assert!(body.contains("<Say voice=\"alice\">Press 1 to continue.</Say>"));
        assert!(body.contains("<Gather input=\"dtmf\" numDigits=\"1\""));
        assert!(body.contains("safehouse.example"));
        assert!(body.contains("gather"));
        assert!(body.contains("timeout=\"10\""));
        assert!(body.contains("<Say>Press 1 now.</Say>"));
        assert!(body.contains("No input received. Goodbye."));
        assert!(body.trim_end().ends_with("</Response>"));
    }

    #[tokio::test]
    async fn test_voice_prompt_accepts_post() {
        let (status, _, body) = send(app(provider()), post_form("/voice", "CallSid=CA1")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<Gather"));
    }

    #[tokio::test]
    async fn test_emergency_prompt() {
        for request in [get("/emergency"), post_form("/emergency", "")] {
            let (status, _, body) = send(app(provider()), request).await;
            assert_eq!(status, StatusCode::OK);
            assert!(body.contains("This is an emergency call from SafeHouse."));
            assert!(body.contains("Please check on them immediately."));
            assert!(body.contains("<Hangup/>"));
        }
    }

    #[tokio::test]
    async fn test_temperature_alert_prompt() {
        let (status, _, body) = send(app(provider()), get("/temperature-alert")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Your home temperature is dangerously high."));
        assert!(body.contains("<Hangup/>"));
    }

    #[tokio::test]
    async fn test_prompts_place_no_calls() {
        let provider = provider();
        for path in ["/voice", "/emergency", "/temperature-alert"] {
            send(app(provider.clone()), get(path)).await;
        }
        assert!(provider.placed_calls().is_empty());
    }

    #[tokio::test]
    async fn test_escalation_prompt_urls_are_served() {
        let plan = EscalationSettings::for_base_url(
            Some("+15551111111".to_string()),
            Some("+15552222222".to_string()),
            Some("+15550000000".to_string()),
            BASE_URL,
        )
        .validate()
        .unwrap();

        for url in [plan.primary_prompt_url, plan.emergency_prompt_url] {
            let path = url.strip_prefix(BASE_URL).unwrap();
            let (status, _, body) = send(app(provider()), get(path)).await;
            assert_eq!(status, StatusCode::OK, "{url}");
            assert!(body.contains("<Hangup/>"), "{url}");
        }
    }
}
