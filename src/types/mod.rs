//! Typed request/response models for the chat-completions wire format.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Chat message with role and text content |
//! | [`ToolDefinition`] | Tool definition for model context |
//! | [`ChatRequest`] | Request payload |

pub mod chat;
pub mod message;
pub mod tool;

pub use chat::ChatRequest;
pub use message::{Message, MessageRole};
pub use tool::{FunctionDefinition, ToolDefinition};
