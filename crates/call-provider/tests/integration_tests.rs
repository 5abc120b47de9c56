//! Integration tests for call-provider.
//!
//! The HTTP tests run against a local mock server and need no credentials.
//!
//! Run the live test (places a real call):
//!   TWILIO_ACCOUNT_SID=... TWILIO_AUTH_TOKEN=... TEST_TO=... TEST_FROM=... \
//!   cargo test --test integration_tests -- --ignored

use call_provider::{
    AnsweredBy, CallProvider, CallRequest, CallStatus, ProviderConfig, ProviderError, TwilioClient,
};
use serde_json::json;
use wiremock::matchers::{basic_auth, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACCOUNT: &str = "AC0123";
const TOKEN: &str = "token-xyz";

async fn client_for(server: &MockServer) -> TwilioClient {
    let config = ProviderConfig::new(ACCOUNT, TOKEN).with_api_base(server.uri());
    TwilioClient::new(config).unwrap()
}

// ============================================================================
// Config tests
// ============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_default_api_base() {
        let config = ProviderConfig::new(ACCOUNT, TOKEN);
        assert_eq!(config.api_base, "https://api.twilio.com");
    }

    #[test]
    fn test_urls() {
        let config = ProviderConfig::new(ACCOUNT, TOKEN);
        assert_eq!(
            config.calls_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC0123/Calls.json"
        );
        assert_eq!(
            config.call_url("CA42"),
            "https://api.twilio.com/2010-04-01/Accounts/AC0123/Calls/CA42.json"
        );
    }

    #[test]
    fn test_client_rejects_empty_credentials() {
        let result = TwilioClient::new(ProviderConfig::new("", TOKEN));
        assert!(matches!(result, Err(ProviderError::Config(_))));
    }
}

// ============================================================================
// HTTP tests (local mock server)
// ============================================================================

mod http_tests {
    use super::*;

    #[tokio::test]
    async fn test_place_call_posts_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC0123/Calls.json"))
            .and(basic_auth(ACCOUNT, TOKEN))
            .and(body_string_contains("To=%2B15551234567"))
            .and(body_string_contains("From=%2B15557654321"))
            .and(body_string_contains("Method=POST"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({
                    "sid": "CA100",
                    "status": "queued",
                    "to": "+15551234567"
                })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let placed = client
            .place_call(CallRequest::new(
                "+15551234567",
                "+15557654321",
                "https://example.test/temperature-alert",
            ))
            .await
            .unwrap();

        assert_eq!(placed.sid, "CA100");
        assert_eq!(placed.status, CallStatus::Queued);
    }

    #[tokio::test]
    async fn test_place_call_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": 21211,
                "message": "The 'To' number is not a valid phone number.",
                "status": 400
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .place_call(CallRequest::new("bogus", "+15557654321", "https://example.test/voice"))
            .await
            .unwrap_err();

        match err {
            ProviderError::Api { status, code, message } => {
                assert_eq!(status, 400);
                assert_eq!(code, 21211);
                assert!(message.contains("not a valid phone number"));
            }
            e => panic!("Unexpected error type: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_api_error_with_plain_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .place_call(CallRequest::new("+1", "+2", "https://example.test/voice"))
            .await
            .unwrap_err();

        match err {
            ProviderError::Api { status, message, .. } => {
                assert_eq!(status, 502);
                assert_eq!(message, "bad gateway");
            }
            e => panic!("Unexpected error type: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_fetch_status_completed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2010-04-01/Accounts/AC0123/Calls/CA200.json"))
            .and(basic_auth(ACCOUNT, TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sid": "CA200",
                "status": "completed",
                "duration": "27",
                "answered_by": "machine_end_beep"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let snapshot = client.fetch_status("CA200").await.unwrap();

        assert_eq!(snapshot.sid, "CA200");
        assert_eq!(snapshot.status, CallStatus::Completed);
        assert_eq!(snapshot.duration_secs, Some(27));
        assert_eq!(snapshot.answered_by, Some(AnsweredBy::Machine));
    }

    #[tokio::test]
    async fn test_fetch_status_in_progress() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sid": "CA201",
                "status": "in-progress",
                "duration": null,
                "answered_by": null
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let snapshot = client.fetch_status("CA201").await.unwrap();

        assert_eq!(snapshot.status, CallStatus::InProgress);
        assert!(snapshot.duration_secs.is_none());
        assert!(snapshot.answered_by.is_none());
    }

    #[tokio::test]
    async fn test_fetch_status_unknown_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": 20404,
                "message": "The requested resource was not found",
                "status": 404
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.fetch_status("CA404").await.unwrap_err();
        assert!(matches!(err, ProviderError::UnknownCall(sid) if sid == "CA404"));
    }

    #[tokio::test]
    async fn test_fetch_status_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"sid\": \"CA9\""))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        match client.fetch_status("CA9").await.unwrap_err() {
            ProviderError::Json(_) => {} // Expected
            e => panic!("Unexpected error type: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let config = ProviderConfig::new(ACCOUNT, TOKEN).with_api_base("http://127.0.0.1:59999");
        let client = TwilioClient::new(config).unwrap();
        let result = client.fetch_status("CA1").await;
        match result.unwrap_err() {
            ProviderError::Http(_) => {} // Expected
            e => panic!("Unexpected error type: {:?}", e),
        }
    }
}

// ============================================================================
// Live tests (require credentials)
// ============================================================================

mod live_tests {
    use super::*;
    use std::env;

    /// Places a real call and fetches its status once.
    #[tokio::test]
    #[ignore = "requires Twilio credentials and TEST_TO/TEST_FROM"]
    async fn test_place_and_fetch_live() {
        let _ = dotenvy::dotenv();
        let sid = env::var("TWILIO_ACCOUNT_SID").expect("TWILIO_ACCOUNT_SID not set");
        let token = env::var("TWILIO_AUTH_TOKEN").expect("TWILIO_AUTH_TOKEN not set");
        let to = env::var("TEST_TO").expect("TEST_TO not set");
        let from = env::var("TEST_FROM").expect("TEST_FROM not set");

        let client = TwilioClient::new(ProviderConfig::new(sid, token)).unwrap();
        let placed = client
            .place_call(CallRequest::new(to, from, "http://demo.twilio.com/docs/voice.xml"))
            .await
            .unwrap();

        let snapshot = client.fetch_status(&placed.sid).await.unwrap();
        println!("Call {} is {}", snapshot.sid, snapshot.status);
    }
}
