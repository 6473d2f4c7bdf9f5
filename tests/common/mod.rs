//! Mock chat-completions endpoint shared by the integration tests.

#![allow(dead_code)]

use chat_smoke::SmokeConfig;
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::net::TcpListener;

pub const CHAT_PATH: &str = "/v1/chat/completions";

/// Test fixture that owns a mock server listening on localhost.
pub struct MockEndpoint {
    pub server: ServerGuard,
}

impl MockEndpoint {
    pub fn new() -> Self {
        Self {
            server: Server::new(),
        }
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.server.url(), CHAT_PATH)
    }

    /// Config pointing the runner at this server.
    pub fn config(&self) -> SmokeConfig {
        SmokeConfig {
            endpoint: self.url().parse().expect("mock url"),
            timeout_secs: Some(10),
            ..SmokeConfig::default()
        }
    }

    /// Reply to any JSON POST with `status` and `body`.
    pub fn reply(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", CHAT_PATH)
            .match_header("content-type", "application/json")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }

    /// Reply 200 only when the request body equals `expected` as JSON.
    pub fn expect_json(&mut self, expected: serde_json::Value, body: &str) -> Mock {
        self.server
            .mock("POST", CHAT_PATH)
            .match_header("content-type", "application/json")
            .match_header(
                "x-request-id",
                Matcher::Regex("^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[0-9a-f]{4}-[0-9a-f]{12}$".to_string()),
            )
            .match_body(Matcher::Json(expected))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }
}

pub const HELLO_COMPLETION: &str = r#"{"choices":[{"message":{"content":"hello"}}]}"#;

/// URL of a local port with nothing listening on it.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, CHAT_PATH)
}
