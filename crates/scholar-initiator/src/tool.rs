//! The `refine` tool

use async_trait::async_trait;
use scholar_core::Status;
use scholar_protocol::{ToolDefinition, ToolHandler};
use serde::Deserialize;
use serde_json::Value;

use crate::refine::develop_design;

#[derive(Debug, Deserialize)]
struct RefineRequest {
    project_id: String,
    prompt: String,
    references: Vec<String>,
}

/// Refines research questions, develops hypotheses, and operationalizes
/// concepts
pub struct RefineTool;

#[async_trait]
impl ToolHandler for RefineTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "refine".to_string(),
            description:
                "Refines research questions, develops hypotheses, and operationalizes concepts."
                    .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "project_id": { "type": "string" },
                    "prompt": { "type": "string" },
                    "references": { "type": "array", "items": { "type": "string" } },
                },
                "required": ["project_id", "prompt", "references"],
            }),
        }
    }

    async fn call(&self, arguments: Value) -> Value {
        let request: RefineRequest = match serde_json::from_value(arguments) {
            Ok(request) => request,
            Err(e) => {
                return self.validation_payload(
                    vec![e.to_string()],
                    vec!["Error in 'refine' tool: malformed arguments".to_string()],
                )
            }
        };

        let design = develop_design(&request.prompt, &request.references);

        let log = vec![
            format!("Processing project_id: {}", request.project_id),
            format!("Received prompt: {}", request.prompt),
            format!("Received {} references.", request.references.len()),
            "Refined question and generated hypotheses.".to_string(),
            "Operationalized concepts.".to_string(),
            "Generated literature review notes.".to_string(),
        ];

        serde_json::json!({
            "status": Status::Success,
            "refined_question": design.refined_question,
            "hypotheses": design.hypotheses,
            "operational_definitions": design.operational_definitions,
            "lit_review_notes": design.lit_review_notes,
            "log": log,
            "errors": [],
        })
    }

    fn validation_payload(&self, errors: Vec<String>, log: Vec<String>) -> Value {
        serde_json::json!({
            "status": Status::Error,
            "refined_question": "",
            "hypotheses": [],
            "operational_definitions": {},
            "lit_review_notes": "",
            "log": log,
            "errors": errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_refine_success_payload_shape() {
        let payload = RefineTool
            .call(serde_json::json!({
                "project_id": "proj_1_abc",
                "prompt": "How does climate change affect coffee production?",
                "references": ["smith2023.pdf"],
            }))
            .await;

        assert_eq!(payload["status"], "success");
        assert!(payload["refined_question"]
            .as_str()
            .unwrap()
            .starts_with("Refined version of:"));
        assert_eq!(payload["hypotheses"].as_array().unwrap().len(), 1);
        assert!(payload["operational_definitions"].is_object());
        assert!(payload["errors"].as_array().unwrap().is_empty());
        assert_eq!(
            payload["log"][0],
            "Processing project_id: proj_1_abc"
        );
    }

    #[tokio::test]
    async fn test_validation_payload_keeps_output_fields() {
        let payload = RefineTool.validation_payload(vec!["bad".to_string()], vec![]);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["refined_question"], "");
        assert!(payload["hypotheses"].as_array().unwrap().is_empty());
    }
}
