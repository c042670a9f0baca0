//! Tool registry with JSON-schema input validation
//!
//! Every server registers its operations here. `invoke` validates arguments
//! against the declared input schema before the operation runs; a validation
//! failure produces a structured error result (one message per violation)
//! and the operation is never attempted.

use async_trait::async_trait;
use jsonschema::JSONSchema;
use scholar_core::{Result, ScholarError, Status, ToolResult};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Static description of one tool: `{name, description, inputSchema}`
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// One named operation exposed by a tool server
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// The tool's name, description, and input schema
    fn definition(&self) -> ToolDefinition;

    /// Execute the operation. Arguments have already passed schema
    /// validation. Returns the payload object (`{status, errors, log, ...}`);
    /// internal failures are reported inside the payload, never thrown.
    async fn call(&self, arguments: Value) -> Value;

    /// Payload shape returned when validation fails, so callers always see
    /// this operation's declared output fields. Servers override this to add
    /// their operation-specific empty fields.
    fn validation_payload(&self, errors: Vec<String>, log: Vec<String>) -> Value {
        serde_json::json!({
            "status": Status::Error,
            "errors": errors,
            "log": log,
        })
    }
}

struct RegisteredTool {
    handler: Arc<dyn ToolHandler>,
    definition: ToolDefinition,
    schema: JSONSchema,
}

/// The set of tools one server exposes
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool, compiling its input schema
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) -> Result<()> {
        let definition = handler.definition();
        let schema = JSONSchema::compile(&definition.input_schema).map_err(|e| {
            ScholarError::Protocol(format!(
                "invalid input schema for tool '{}': {}",
                definition.name, e
            ))
        })?;
        self.tools.push(RegisteredTool {
            handler,
            definition,
            schema,
        });
        Ok(())
    }

    /// Capability listing: the static definitions of every registered tool
    pub fn list(&self) -> Vec<&ToolDefinition> {
        self.tools.iter().map(|t| &t.definition).collect()
    }

    /// Invoke a tool by name
    ///
    /// Unknown names are the one fatal condition at this layer and surface
    /// as `ScholarError::UnknownTool`. Everything else, including validation
    /// failures and tool-internal errors, comes back as a structured result.
    pub async fn invoke(&self, name: &str, arguments: Value) -> Result<ToolResult> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.definition.name == name)
            .ok_or_else(|| ScholarError::UnknownTool(name.to_string()))?;

        if let Err(violations) = tool.schema.validate(&arguments) {
            let messages: Vec<String> = violations.map(|v| v.to_string()).collect();
            warn!(tool = name, ?messages, "input validation failed");
            let log = vec![format!("Error in '{}' tool: input validation failed", name)];
            let payload = tool.handler.validation_payload(messages, log);
            return ToolResult::from_payload(&payload, true);
        }

        debug!(tool = name, "invoking");
        let payload = tool.handler.call(arguments).await;
        let is_error = payload
            .get("status")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Status>().ok())
            .map(|status| status == Status::Error)
            .unwrap_or(false);
        ToolResult::from_payload(&payload, is_error)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
