//! Assessment Gateway Integration Tests
//!
//! Tests the gateway and the assessment panel end to end:
//! - Panel flow with a scripted provider (success, fallback, failure)
//! - The Gemini wire contract against a one-shot local HTTP listener
//! - Transport failures collapsing into the fixed failure message
//!
//! These tests do NOT require API keys or network access beyond loopback.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use guardia::llm::{
    ASSESSMENT_FALLBACK, COMPLIANCE_OFFICER_PROMPT, GeminiClient, GenerationRequest,
    OpenAiClient, TextGenerator, build_assessment_prompt,
};
use guardia::{
    AssessmentGateway, AssessmentState, DomainStore, Error, Result, Workspace,
};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;

// ============================================================================
// Test Helpers
// ============================================================================

/// Provider returning a fixed outcome and counting calls.
struct Scripted {
    outcome: fn() -> Result<Option<String>>,
    calls: AtomicUsize,
}

impl Scripted {
    fn new(outcome: fn() -> Result<Option<String>>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
        })
    }
}

impl TextGenerator for Scripted {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    fn generate(&self, _request: &GenerationRequest) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.outcome)()
    }
}

/// A request captured by [`serve_once`].
struct CapturedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: serde_json::Value,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Accepts one HTTP request on loopback, answers with `status` and `body`.
///
/// Returns the base URL and a channel yielding the captured request.
fn serve_once(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((k, v)) = line.split_once(':') {
                headers.push((k.trim().to_string(), v.trim().to_string()));
            }
        }

        let length: usize = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .map_or(0, |(_, v)| v.parse().unwrap());
        let mut raw = vec![0u8; length];
        reader.read_exact(&mut raw).unwrap();

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();

        tx.send(CapturedRequest {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: serde_json::from_slice(&raw).unwrap_or(serde_json::Value::Null),
        })
        .unwrap();
    });

    (format!("http://{addr}"), rx)
}

// ============================================================================
// Panel flow
// ============================================================================

mod panel_flow {
    use super::*;

    #[tokio::test]
    async fn test_successful_assessment_is_shown() {
        let provider = Scripted::new(|| Ok(Some("## Risk: Medium".to_string())));
        let gateway = AssessmentGateway::new(provider.clone());
        let mut workspace = Workspace::new(Arc::new(DomainStore::new()));

        let panel = workspace.panel_mut();
        panel.open();
        panel.set_prompt("Share loyalty data with partners");
        assert!(panel.submit(&gateway).await);

        assert_eq!(
            panel.state(),
            &AssessmentState::Completed("## Risk: Medium".to_string())
        );
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_prompt_never_calls_provider() {
        let provider = Scripted::new(|| panic!("provider must not be called"));
        let gateway = AssessmentGateway::new(provider.clone());
        let mut workspace = Workspace::new(Arc::new(DomainStore::new()));

        let panel = workspace.panel_mut();
        panel.set_prompt(" \t ");
        assert!(!panel.submit(&gateway).await);
        assert_eq!(panel.state(), &AssessmentState::Idle);
        assert!(!panel.is_loading());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_text_yields_fallback() {
        let gateway = AssessmentGateway::new(Scripted::new(|| Ok(None)));
        let mut workspace = Workspace::new(Arc::new(DomainStore::new()));

        let panel = workspace.panel_mut();
        panel.set_prompt("Profile users by purchase history");
        panel.submit(&gateway).await;
        assert_eq!(panel.report(), Some(ASSESSMENT_FALLBACK));
    }

    #[tokio::test]
    async fn test_empty_string_shows_fallback_not_blank_report() {
        let gateway = AssessmentGateway::new(Scripted::new(|| Ok(Some(String::new()))));
        let mut workspace = Workspace::new(Arc::new(DomainStore::new()));

        let panel = workspace.panel_mut();
        panel.set_prompt("Share emails");
        assert!(panel.submit(&gateway).await);
        assert_eq!(
            panel.state(),
            &AssessmentState::Completed(ASSESSMENT_FALLBACK.to_string())
        );
    }

    #[tokio::test]
    async fn test_service_failure_is_inline_and_retryable() {
        let gateway = AssessmentGateway::new(Scripted::new(|| {
            Err(Error::OperationFailed {
                operation: "gemini_request".to_string(),
                cause: "API returned status: 503".to_string(),
            })
        }));
        let mut workspace = Workspace::new(Arc::new(DomainStore::new()));

        let panel = workspace.panel_mut();
        panel.set_prompt("Retain chat logs indefinitely");
        assert!(panel.submit(&gateway).await);
        assert_eq!(
            panel.report(),
            Some(
                "Error performing AI assessment: Failed to communicate with AI Compliance Assistant."
            )
        );
        assert!(panel.can_submit());
    }

    #[tokio::test]
    async fn test_assessment_leaves_store_untouched() {
        let store = Arc::new(DomainStore::new());
        let mut workspace = Workspace::new(Arc::clone(&store));
        let gateway = AssessmentGateway::new(Scripted::new(|| Ok(Some("ok".to_string()))));

        let panel = workspace.panel_mut();
        panel.set_prompt("Email marketing to EU residents");
        panel.submit(&gateway).await;

        assert_eq!(workspace.refresh_pending(), 0);
        assert_eq!(store.revision(), 0);
    }
}

// ============================================================================
// Gemini wire contract
// ============================================================================

mod gemini_wire {
    use super::*;

    #[test]
    fn test_request_shape_and_text_concatenation() {
        let (base_url, captured) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Risk: "},{"text":"Low"}]}}]}"#,
        );
        let client = GeminiClient::new()
            .with_api_key("test-key")
            .with_endpoint(base_url)
            .with_model("test-model");
        let gateway = AssessmentGateway::new(Arc::new(client));

        let report = gateway.assess("Collect device identifiers").unwrap();
        assert_eq!(report, "Risk: Low");

        let request = captured.recv().unwrap();
        assert_eq!(
            request.request_line,
            "POST /models/test-model:generateContent HTTP/1.1"
        );
        assert_eq!(request.header("x-goog-api-key"), Some("test-key"));
        assert_eq!(
            request.body["contents"][0]["parts"][0]["text"],
            build_assessment_prompt("Collect device identifiers")
        );
        assert_eq!(
            request.body["systemInstruction"]["parts"][0]["text"],
            COMPLIANCE_OFFICER_PROMPT
        );
        let temperature = request.body["generationConfig"]["temperature"]
            .as_f64()
            .unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_no_candidates_yields_fallback() {
        let (base_url, _captured) = serve_once("200 OK", r#"{"candidates":[]}"#);
        let client = GeminiClient::new()
            .with_api_key("test-key")
            .with_endpoint(base_url);
        let gateway = AssessmentGateway::new(Arc::new(client));

        assert_eq!(gateway.assess("Store IPs").unwrap(), ASSESSMENT_FALLBACK);
    }

    #[test]
    fn test_error_status_is_masked() {
        let (base_url, _captured) = serve_once(
            "500 Internal Server Error",
            r#"{"error":{"message":"internal detail"}}"#,
        );
        let client = GeminiClient::new()
            .with_api_key("test-key")
            .with_endpoint(base_url);
        let gateway = AssessmentGateway::new(Arc::new(client));

        let err = gateway.assess("Store IPs").unwrap_err();
        assert!(matches!(err, Error::AssistantUnavailable));
        assert!(!err.to_string().contains("internal detail"));
    }
}

// ============================================================================
// Transport failures
// ============================================================================

mod transport {
    use super::*;

    #[test]
    fn test_gemini_connection_refused() {
        let client = GeminiClient::new()
            .with_api_key("test-key")
            .with_endpoint("http://127.0.0.1:59998");
        let gateway = AssessmentGateway::new(Arc::new(client));

        assert!(matches!(
            gateway.assess("Share emails"),
            Err(Error::AssistantUnavailable)
        ));
    }

    #[test]
    fn test_openai_connection_refused() {
        let client = OpenAiClient::new()
            .with_api_key("sk-test")
            .with_endpoint("http://127.0.0.1:59997");
        let gateway = AssessmentGateway::new(Arc::new(client));

        assert!(matches!(
            gateway.assess("Share emails"),
            Err(Error::AssistantUnavailable)
        ));
    }

    #[test]
    fn test_direct_client_error_names_operation() {
        let client = GeminiClient::new()
            .with_api_key("test-key")
            .with_endpoint("http://127.0.0.1:59996");
        let request = GenerationRequest {
            system_instruction: COMPLIANCE_OFFICER_PROMPT.to_string(),
            prompt: build_assessment_prompt("x"),
            temperature: 0.7,
        };

        match client.generate(&request) {
            Err(Error::OperationFailed { operation, .. }) => {
                assert_eq!(operation, "gemini_request");
            },
            other => panic!("expected OperationFailed, got {other:?}"),
        }
    }
}
