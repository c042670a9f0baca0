//! The `compose` tool

use async_trait::async_trait;
use chrono::Utc;
use scholar_core::{ScholarConfig, Status};
use scholar_protocol::{ToolDefinition, ToolHandler};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::sections;

#[derive(Debug, Deserialize)]
struct ComposeRequest {
    project_id: String,
    refined_question: String,
    hypotheses: Vec<String>,
    results: String,
    lit_review_notes: Option<String>,
    methodology: Option<String>,
    data_description: Option<String>,
}

/// Composes a final research report by synthesizing all project components
pub struct ComposeTool {
    config: ScholarConfig,
}

impl ComposeTool {
    pub fn new(config: ScholarConfig) -> Self {
        Self { config }
    }

    fn failure(&self, message: String, log: &mut Vec<String>) -> Value {
        log.push(format!("Error in 'compose' tool: {}", message));
        self.validation_payload(vec![message], log.clone())
    }

    async fn compose(&self, request: &ComposeRequest, log: &mut Vec<String>) -> Value {
        log.push(format!(
            "Starting report composition for project: {}",
            request.project_id
        ));

        log.push("Generating executive summary...".to_string());
        let executive = sections::executive_summary(
            &request.refined_question,
            &request.hypotheses,
            &request.results,
        );

        log.push("Generating literature review...".to_string());
        let literature = sections::literature_review(request.lit_review_notes.as_deref());

        log.push("Generating methodology section...".to_string());
        let methodology = sections::methodology(
            request.methodology.as_deref(),
            request.data_description.as_deref(),
        );

        log.push("Generating results section...".to_string());
        let results = sections::results_section(&request.results, &request.hypotheses);

        log.push("Generating discussion and conclusions...".to_string());
        let discussion = sections::discussion(&request.refined_question);

        log.push("Generating references...".to_string());
        let references = sections::references();

        let report = format!(
            "# Research Report: {}\n\n\
             **Project ID:** {}  \n\
             **Generated:** {}\n\n\
             {}\n\n{}\n\n{}\n\n{}\n\n{}\n\n{}\n\n\
             ---\n\
             *This report was generated by the Scholar research suite*",
            request.refined_question,
            request.project_id,
            Utc::now().to_rfc3339(),
            executive,
            literature,
            methodology,
            results,
            discussion,
            references,
        );

        log.push("Saving report to file...".to_string());
        let report_path = self.config.report_path(&request.project_id);
        if let Some(dir) = report_path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(dir).await {
                return self.failure(format!("Failed to save report: {}", e), log);
            }
        }
        if let Err(e) = tokio::fs::write(&report_path, &report).await {
            return self.failure(format!("Failed to save report: {}", e), log);
        }
        log.push(format!("Report saved to: {}", report_path.display()));

        let summary = format!(
            "Research report completed for project {}. The report addresses the research \
             question \"{}\" and includes analysis of {} hypotheses. The comprehensive report \
             covers literature review, methodology, results, and conclusions with practical \
             implications for the field.",
            request.project_id,
            request.refined_question,
            request.hypotheses.len(),
        );

        info!(project_id = %request.project_id, path = %report_path.display(), "report composed");

        serde_json::json!({
            "status": Status::Success,
            "research_report": report_path.display().to_string(),
            "summary": summary,
            "errors": [],
            "log": log,
        })
    }
}

#[async_trait]
impl ToolHandler for ComposeTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "compose".to_string(),
            description:
                "Composes a final research report by synthesizing all project components"
                    .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "project_id": { "type": "string" },
                    "refined_question": { "type": "string" },
                    "hypotheses": { "type": "array", "items": { "type": "string" } },
                    "results": { "type": "string" },
                    "lit_review_notes": { "type": "string" },
                    "methodology": { "type": "string" },
                    "data_description": { "type": "string" },
                },
                "required": ["project_id", "refined_question", "hypotheses", "results"],
            }),
        }
    }

    async fn call(&self, arguments: Value) -> Value {
        let mut log: Vec<String> = Vec::new();

        let request: ComposeRequest = match serde_json::from_value(arguments) {
            Ok(request) => request,
            Err(e) => return self.failure(format!("malformed arguments: {}", e), &mut log),
        };

        self.compose(&request, &mut log).await
    }

    fn validation_payload(&self, errors: Vec<String>, log: Vec<String>) -> Value {
        serde_json::json!({
            "status": Status::Error,
            "research_report": "",
            "summary": "",
            "errors": errors,
            "log": log,
        })
    }
}
