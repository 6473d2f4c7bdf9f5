//! Response-shape validation using JSON Schema.

use crate::error::{Error, ErrorContext};
use crate::Result;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

/// Checks that a 200 body looks like a chat completion before any field is read.
pub struct ResponseValidator {
    schema: JSONSchema,
}

impl ResponseValidator {
    pub fn new() -> Result<Self> {
        let schema_value = Self::completion_schema();
        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_value)
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("Failed to compile response schema: {}", e),
                    ErrorContext::new().with_source("response_validator"),
                )
            })?;
        Ok(Self { schema })
    }

    /// Minimal chat-completion shape: a non-empty `choices` array whose first
    /// entry carries a string `message.content`. Later choices are not read.
    fn completion_schema() -> Value {
        serde_json::json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "required": ["choices"],
            "properties": {
                "choices": {
                    "type": "array",
                    "minItems": 1,
                    "items": [
                        {
                            "type": "object",
                            "required": ["message"],
                            "properties": {
                                "message": {
                                    "type": "object",
                                    "required": ["content"],
                                    "properties": {
                                        "content": { "type": "string" }
                                    }
                                }
                            }
                        }
                    ]
                }
            },
            "additionalProperties": true
        })
    }

    pub fn validate(&self, body: &Value) -> Result<()> {
        if let Err(errors) = self.schema.validate(body) {
            let messages: Vec<String> = errors
                .map(|e| {
                    let path = e.instance_path.to_string();
                    if path.is_empty() {
                        e.to_string()
                    } else {
                        format!("{} (at {})", e, path)
                    }
                })
                .collect();
            return Err(Error::validation_with_context(
                "response does not look like a chat completion",
                ErrorContext::new()
                    .with_details(messages.join("; "))
                    .with_source("response_validator"),
            ));
        }
        Ok(())
    }
}
