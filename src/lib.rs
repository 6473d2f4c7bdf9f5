//! # chat-smoke
//!
//! Large-payload smoke tests for OpenAI-compatible chat-completions endpoints.
//!
//! ## Overview
//!
//! Each scenario builds one fixed-shape request, sends it with a single
//! blocking POST, and prints a pass/fail report. Nothing is retried and no
//! outcome is fatal: the binaries exit 0 whatever the endpoint does.
//!
//! | Scenario | Payload |
//! |----------|---------|
//! | [`Scenario::LargePrompt`] | one user message built around a 60 KiB filler string |
//! | [`Scenario::LargeTools`] | a user message plus 50 synthetic tool definitions |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chat_smoke::{Scenario, SmokeConfig, SmokeRunner};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = SmokeRunner::new(SmokeConfig::from_env()?)?;
//!     let outcome = runner.run(Scenario::LargePrompt, &mut std::io::stdout())?;
//!     println!("passed: {}", outcome.is_success());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Defaults, YAML file and env overrides |
//! | [`payload`] | Filler string, tool definitions, scenario payloads |
//! | [`runner`] | Request execution, outcome classification, report |
//! | [`transport`] | Blocking HTTP transport |
//! | [`types`] | Chat request wire types |
//! | [`validation`] | Response-shape checks |

pub mod config;
pub mod logging;
pub mod payload;
pub mod runner;
pub mod transport;
pub mod types;
pub mod utils;
pub mod validation;

pub use config::SmokeConfig;
pub use payload::Scenario;
pub use runner::{run_from_env, Outcome, SmokeRunner};
pub use types::{ChatRequest, Message, MessageRole, ToolDefinition};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
