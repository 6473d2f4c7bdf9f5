//! Runner behavior against a mock chat-completions endpoint.

mod common;

use chat_smoke::payload::{Scenario, TOOL_COUNT};
use chat_smoke::{ChatRequest, Outcome, SmokeConfig, SmokeRunner};
use common::{refused_url, MockEndpoint, HELLO_COMPLETION};
use std::io::Read;
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

fn run(config: SmokeConfig, scenario: Scenario) -> (Outcome, String) {
    let runner = SmokeRunner::new(config).expect("runner");
    let mut buf = Vec::new();
    let outcome = runner.run(scenario, &mut buf).expect("report");
    (outcome, String::from_utf8(buf).expect("utf8 report"))
}

#[test]
fn success_prints_marker_and_excerpt() {
    let mut endpoint = MockEndpoint::new();
    let mock = endpoint.reply(200, HELLO_COMPLETION);

    let (outcome, out) = run(endpoint.config(), Scenario::LargePrompt);

    mock.assert();
    assert_eq!(
        outcome,
        Outcome::Success {
            content: "hello".to_string()
        }
    );
    assert!(out.starts_with("Testing stdin implementation with large prompt...\n"));
    assert!(out.contains("Prompt size: 61440 bytes"));
    assert!(out.contains("✅ Success! Large prompt handled correctly"));
    assert!(out.contains("Response: hello..."));
}

#[test]
fn tools_scenario_reports_length() {
    let mut endpoint = MockEndpoint::new();
    let _mock = endpoint.reply(200, HELLO_COMPLETION);

    let (outcome, out) = run(endpoint.config(), Scenario::LargeTools);

    assert!(outcome.is_success());
    assert!(out.contains("Tools count: 50"));
    assert!(out.contains("✅ Success! Stdin implementation working"));
    assert!(out.contains("Response length: 5"));
}

#[test]
fn long_content_is_truncated_to_200_chars() {
    let mut endpoint = MockEndpoint::new();
    let content = "y".repeat(1000);
    let body = serde_json::json!({"choices": [{"message": {"content": content}}]}).to_string();
    let _mock = endpoint.reply(200, &body);

    let (_, out) = run(endpoint.config(), Scenario::LargePrompt);

    let expected = format!("Response: {}...\n", "y".repeat(200));
    assert!(out.ends_with(&expected), "unexpected report:\n{}", out);
}

#[test]
fn later_choices_are_not_validated() {
    let mut endpoint = MockEndpoint::new();
    let _mock = endpoint.reply(
        200,
        r#"{"choices":[{"message":{"content":"hello"}},{"message":{"content":null}}]}"#,
    );

    let (outcome, out) = run(endpoint.config(), Scenario::LargePrompt);

    assert_eq!(
        outcome,
        Outcome::Success {
            content: "hello".to_string()
        }
    );
    assert!(out.contains("✅ Success! Large prompt handled correctly"));
    assert!(out.contains("Response: hello..."));
}

#[test]
fn server_error_prints_status_and_body() {
    let mut endpoint = MockEndpoint::new();
    let _mock = endpoint.reply(500, "server error");

    let (outcome, out) = run(endpoint.config(), Scenario::LargePrompt);

    assert_eq!(
        outcome,
        Outcome::HttpError {
            status: 500,
            body: "server error".to_string()
        }
    );
    assert!(out.contains("❌ Error: 500\nserver error\n"));
}

#[test]
fn non_200_success_codes_are_still_errors() {
    let mut endpoint = MockEndpoint::new();
    let _mock = endpoint.reply(201, HELLO_COMPLETION);

    let (outcome, _) = run(endpoint.config(), Scenario::LargeTools);

    assert!(matches!(outcome, Outcome::HttpError { status: 201, .. }));
}

#[test]
fn refused_connection_is_reported_not_raised() {
    let config = SmokeConfig {
        endpoint: refused_url().parse().unwrap(),
        ..SmokeConfig::default()
    };

    let (outcome, out) = run(config, Scenario::LargePrompt);

    assert!(matches!(outcome, Outcome::Failed { .. }));
    assert!(out.contains("❌ Error: Connection error"), "report:\n{}", out);
}

#[test]
fn silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    // Accept and drain the request, then hold the socket open without replying.
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 8192];
            stream
                .set_read_timeout(Some(Duration::from_millis(200)))
                .ok();
            while let Ok(n) = stream.read(&mut buf) {
                if n == 0 {
                    break;
                }
            }
            thread::sleep(Duration::from_secs(5));
        }
    });

    let config = SmokeConfig {
        endpoint: format!("http://127.0.0.1:{}/v1/chat/completions", port)
            .parse()
            .unwrap(),
        timeout_secs: Some(1),
        ..SmokeConfig::default()
    };

    let (outcome, out) = run(config, Scenario::LargePrompt);

    assert!(matches!(outcome, Outcome::Failed { .. }), "{:?}", outcome);
    assert!(out.contains("❌ Error: Timeout"), "report:\n{}", out);
}

#[test]
fn malformed_json_is_a_failure() {
    let mut endpoint = MockEndpoint::new();
    let _mock = endpoint.reply(200, "<html>not json</html>");

    let (outcome, out) = run(endpoint.config(), Scenario::LargePrompt);

    match outcome {
        Outcome::Failed { message } => assert!(message.starts_with("Serialization error")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(out.contains("❌ Error: Serialization error"));
    assert!(!out.contains("✅"));
}

#[test]
fn bad_success_body_prints_a_single_marker() {
    for body in ["not json", r#"{"choices":[]}"#, r#"{"choices":[{"message":{}}]}"#] {
        let mut endpoint = MockEndpoint::new();
        let _mock = endpoint.reply(200, body);

        let (outcome, out) = run(endpoint.config(), Scenario::LargeTools);

        assert!(!outcome.is_success(), "body {:?}", body);
        let markers: Vec<&str> = out
            .lines()
            .filter(|l| l.starts_with("✅") || l.starts_with("❌"))
            .collect();
        assert_eq!(markers.len(), 1, "body {:?}, report:\n{}", body, out);
        assert!(markers[0].starts_with("❌ Error:"));
    }
}

#[test]
fn missing_keys_are_a_failure() {
    let mut endpoint = MockEndpoint::new();
    let _mock = endpoint.reply(200, r#"{"choices":[]}"#);

    let (outcome, out) = run(endpoint.config(), Scenario::LargePrompt);

    match outcome {
        Outcome::Failed { message } => assert!(message.starts_with("Validation error")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(out.contains("❌ Error: Validation error"));
}

#[test]
fn sent_body_matches_built_payload() {
    for scenario in [Scenario::LargePrompt, Scenario::LargeTools] {
        let mut endpoint = MockEndpoint::new();
        let config = endpoint.config();
        let payload = scenario.build_payload(&config.model);
        let expected = serde_json::to_value(&payload).unwrap();
        let mock = endpoint.expect_json(expected, HELLO_COMPLETION);

        let runner = SmokeRunner::new(config).unwrap();
        let outcome = runner.execute(scenario, &payload);

        mock.assert();
        assert!(outcome.is_success(), "{:?}: {:?}", scenario, outcome);
    }
}

#[test]
fn serialized_payload_decodes_to_the_same_request() {
    let payload = Scenario::LargeTools.build_payload("sonnet");
    let bytes = serde_json::to_vec(&payload).unwrap();

    let decoded: ChatRequest = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(decoded, payload);
    assert_eq!(decoded.tools.map(|t| t.len()), Some(TOOL_COUNT));
}
