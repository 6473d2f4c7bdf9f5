//! The smoke-test runner: send one payload, classify the reply, print a report.
//!
//! A run never fails as a whole. Transport errors, malformed bodies and
//! missing keys all end up as [`Outcome::Failed`]; only writing the report
//! itself can return an I/O error.

use crate::config::SmokeConfig;
use crate::error::{Error, ErrorContext};
use crate::payload::{filler, Scenario, TOOL_COUNT};
use crate::transport::HttpTransport;
use crate::types::ChatRequest;
use crate::utils::json_path;
use crate::validation::ResponseValidator;
use crate::Result;
use serde_json::Value;
use std::io::{self, Write};
use tracing::{info, warn};
use uuid::Uuid;

pub const CONTENT_PATH: &str = "choices[0].message.content";

/// Characters of response content echoed by the large-prompt report.
pub const EXCERPT_CHARS: usize = 200;

pub const SUCCESS_MARKER: &str = "✅";
pub const FAILURE_MARKER: &str = "❌";

/// Terminal state of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// HTTP 200 with a well-formed completion.
    Success { content: String },
    /// Any status other than 200; the body is kept verbatim.
    HttpError { status: u16, body: String },
    /// Request, decoding or configuration failed.
    Failed { message: String },
}

impl Outcome {
    pub fn failed(err: &Error) -> Self {
        Outcome::Failed {
            message: describe(err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Print the result lines for `scenario`.
    pub fn report<W: Write>(&self, scenario: Scenario, out: &mut W) -> io::Result<()> {
        match self {
            Outcome::Success { content } => match scenario {
                Scenario::LargePrompt => {
                    writeln!(out, "{} Success! Large prompt handled correctly", SUCCESS_MARKER)?;
                    writeln!(out, "Response: {}...", excerpt(content, EXCERPT_CHARS))?;
                }
                Scenario::LargeTools => {
                    writeln!(out, "{} Success! Stdin implementation working", SUCCESS_MARKER)?;
                    writeln!(out, "Response length: {}", content.chars().count())?;
                }
            },
            Outcome::HttpError { status, body } => {
                writeln!(out, "{} Error: {}", FAILURE_MARKER, status)?;
                writeln!(out, "{}", body)?;
            }
            Outcome::Failed { message } => {
                writeln!(out, "{} Error: {}", FAILURE_MARKER, message)?;
            }
        }
        Ok(())
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Display string for a failed run, naming connection problems explicitly.
fn describe(err: &Error) -> String {
    if err.is_connect() {
        format!("Connection error: {}", err)
    } else if err.is_timeout() {
        format!("Timeout: {}", err)
    } else {
        err.to_string()
    }
}

pub fn write_banner<W: Write>(scenario: Scenario, out: &mut W) -> io::Result<()> {
    writeln!(out, "Testing stdin implementation with large prompt...")?;
    writeln!(out, "Prompt size: {} bytes", filler().len())?;
    if let Scenario::LargeTools = scenario {
        writeln!(out, "Tools count: {}", TOOL_COUNT)?;
    }
    Ok(())
}

pub struct SmokeRunner {
    config: SmokeConfig,
    transport: HttpTransport,
    validator: ResponseValidator,
}

impl SmokeRunner {
    pub fn new(config: SmokeConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        let validator = ResponseValidator::new()?;
        Ok(Self {
            config,
            transport,
            validator,
        })
    }

    /// Banner, one request, report.
    pub fn run<W: Write>(&self, scenario: Scenario, out: &mut W) -> io::Result<Outcome> {
        write_banner(scenario, out)?;
        let outcome = self.execute(scenario, &scenario.build_payload(&self.config.model));
        outcome.report(scenario, out)?;
        Ok(outcome)
    }

    /// Send `request` once and classify the reply.
    pub fn execute(&self, scenario: Scenario, request: &ChatRequest) -> Outcome {
        let request_id = Uuid::new_v4().to_string();
        info!(
            scenario = scenario.name(),
            url = %self.transport.endpoint(),
            model = %request.model,
            tools = request.tools.as_ref().map_or(0, Vec::len),
            request_id = %request_id,
            "starting smoke request"
        );

        let outcome = match self.exchange(request, &request_id) {
            Ok(outcome) => outcome,
            Err(e) => Outcome::failed(&e),
        };

        match &outcome {
            Outcome::Success { content } => info!(
                request_id = %request_id,
                content_chars = content.chars().count(),
                "smoke request succeeded"
            ),
            Outcome::HttpError { status, body } => warn!(
                request_id = %request_id,
                status,
                body_bytes = body.len(),
                "endpoint returned non-200 status"
            ),
            Outcome::Failed { message } => {
                warn!(request_id = %request_id, error = %message, "smoke request failed")
            }
        }
        outcome
    }

    fn exchange(&self, request: &ChatRequest, request_id: &str) -> Result<Outcome> {
        let reply = self.transport.post_json(request, request_id)?;
        if !reply.is_ok() {
            return Ok(Outcome::HttpError {
                status: reply.status,
                body: reply.body,
            });
        }
        let content = self.extract_content(&reply.body)?;
        Ok(Outcome::Success { content })
    }

    fn extract_content(&self, body: &str) -> Result<String> {
        let value: Value = serde_json::from_str(body)?;
        self.validator.validate(&value)?;
        let content = json_path::get_str(&value, CONTENT_PATH).map_err(|e| {
            Error::validation_with_context(
                e.to_string(),
                ErrorContext::new()
                    .with_field_path(CONTENT_PATH)
                    .with_source("runner"),
            )
        })?;
        Ok(content.to_string())
    }
}

/// Entry point of the smoke binaries: resolve configuration from the
/// environment and run `scenario`, reporting configuration errors the same
/// way as request failures.
pub fn run_from_env<W: Write>(scenario: Scenario, out: &mut W) -> io::Result<Outcome> {
    match SmokeConfig::from_env().and_then(SmokeRunner::new) {
        Ok(runner) => runner.run(scenario, out),
        Err(e) => {
            write_banner(scenario, out)?;
            let outcome = Outcome::failed(&e);
            outcome.report(scenario, out)?;
            Ok(outcome)
        }
    }
}
