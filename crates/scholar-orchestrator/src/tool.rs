//! The `initiate` tool

use async_trait::async_trait;
use scholar_protocol::{ToolDefinition, ToolHandler};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::pipeline::{Coordinator, InitiateRequest};

#[derive(Debug, Deserialize)]
struct InitiateArgs {
    project_title: String,
    user_prompt: String,
    references: Vec<String>,
    raw_data: String,
}

/// Initiates a new research project and coordinates the workflow
pub struct InitiateTool {
    coordinator: Arc<Coordinator>,
}

impl InitiateTool {
    pub fn new(coordinator: Arc<Coordinator>) -> Self {
        Self { coordinator }
    }
}

#[async_trait]
impl ToolHandler for InitiateTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "initiate".to_string(),
            description: "Initiates a new research project and coordinates the workflow"
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "project_title": { "type": "string" },
                    "user_prompt": { "type": "string" },
                    "references": { "type": "array", "items": { "type": "string" } },
                    "raw_data": { "type": "string" },
                },
                "required": ["project_title", "user_prompt", "references", "raw_data"],
            }),
        }
    }

    async fn call(&self, arguments: Value) -> Value {
        let args: InitiateArgs = match serde_json::from_value(arguments) {
            Ok(args) => args,
            Err(e) => {
                return self.validation_payload(
                    vec![e.to_string()],
                    vec!["Error in 'initiate' tool: malformed arguments".to_string()],
                )
            }
        };

        self.coordinator
            .initiate(InitiateRequest {
                project_title: args.project_title,
                user_prompt: args.user_prompt,
                references: args.references,
                raw_data: args.raw_data,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    #[tokio::test]
    async fn test_initiate_tool_reports_workflow_error_payload() {
        let transport = MockTransport::new().with_unavailable("initiator", "refine", "down");
        let tool = InitiateTool::new(Arc::new(Coordinator::new(Arc::new(transport))));

        let payload = tool
            .call(serde_json::json!({
                "project_title": "T",
                "user_prompt": "Q?",
                "references": [],
                "raw_data": "raw.csv",
            }))
            .await;

        assert_eq!(payload["status"], "error");
        assert!(payload["project_id"].as_str().unwrap().starts_with("proj_"));
    }

    #[tokio::test]
    async fn test_malformed_arguments_use_generic_error_payload() {
        let tool = InitiateTool::new(Arc::new(Coordinator::new(Arc::new(MockTransport::new()))));
        let payload = tool.call(serde_json::json!({"project_title": 42})).await;
        assert_eq!(payload["status"], "error");
        assert!(!payload["errors"].as_array().unwrap().is_empty());
    }
}
