//! Fixed-shape request payloads for the two smoke scenarios.

use crate::types::{ChatRequest, Message, ToolDefinition};
use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Size of the filler string (60 KiB).
pub const FILLER_LEN: usize = 60 * 1024;
pub const FILLER_CHAR: char = 'x';

/// Characters of filler quoted in the message content.
pub const PREFIX_LEN: usize = 100;

pub const TOOL_COUNT: usize = 50;
pub const TOOL_DESCRIPTION_PAD: usize = 500;
const TOOL_DESCRIPTION_LEAD: &str =
    "This is a large tool description that simulates real MCP tool contexts. ";

static FILLER: Lazy<String> = Lazy::new(|| FILLER_CHAR.to_string().repeat(FILLER_LEN));

/// The 60 KiB filler string.
pub fn filler() -> &'static str {
    &FILLER
}

fn filler_prefix() -> &'static str {
    // The filler is ASCII, so byte and char offsets agree.
    &filler()[..PREFIX_LEN]
}

/// JSON schema shared by every synthetic tool: two required fields.
pub fn tool_parameters() -> Value {
    json!({
        "type": "object",
        "properties": {
            "param1": {"type": "string", "description": "Parameter 1"},
            "param2": {"type": "number", "description": "Parameter 2"}
        },
        "required": ["param1", "param2"]
    })
}

/// `TOOL_COUNT` synthetic tool definitions named `large_tool_<i>`.
pub fn large_tools() -> Vec<ToolDefinition> {
    let pad = FILLER_CHAR.to_string().repeat(TOOL_DESCRIPTION_PAD);
    (0..TOOL_COUNT)
        .map(|i| {
            ToolDefinition::function(
                format!("large_tool_{}", i),
                format!("{}{}", TOOL_DESCRIPTION_LEAD, pad),
                tool_parameters(),
            )
        })
        .collect()
}

/// Which scripted interaction to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// One oversized user message, no tools.
    LargePrompt,
    /// A user message plus `TOOL_COUNT` tool definitions.
    LargeTools,
}

impl Scenario {
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::LargePrompt => "large_prompt",
            Scenario::LargeTools => "large_tools",
        }
    }

    pub fn content(&self) -> String {
        match self {
            Scenario::LargePrompt => format!(
                "This is a large content test. Content length: {} bytes. First {} chars: {}",
                filler().len(),
                PREFIX_LEN,
                filler_prefix()
            ),
            Scenario::LargeTools => format!(
                "Process this large content (first {} chars): {}",
                PREFIX_LEN,
                filler_prefix()
            ),
        }
    }

    pub fn build_payload(&self, model: &str) -> ChatRequest {
        let request = ChatRequest::new(model, vec![Message::user(self.content())]);
        match self {
            Scenario::LargePrompt => request,
            Scenario::LargeTools => request.with_tools(large_tools()),
        }
    }
}
