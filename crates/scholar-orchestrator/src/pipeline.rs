//! Pipeline coordination
//!
//! The `initiate` workflow runs the downstream servers strictly in order:
//! research design, then data processing, then code generation. Each step
//! only runs when the stage it needs was reached. An unreachable data
//! processor is skipped, not fatal; code generation then falls back to the
//! raw dataset. Only a failure in the first step escapes the pipeline and
//! turns into an `error` response.

use scholar_core::{generate_project_id, Result, Status};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::state::{ProjectState, ProjectStore, WorkflowStage};
use crate::transport::ToolTransport;

/// Analysis plan sent to the code generator for every project
const DEFAULT_ANALYSIS_PLAN: [&str; 3] = [
    "descriptive statistics",
    "correlation analysis",
    "hypothesis testing",
];

/// Validated `initiate` arguments
#[derive(Debug, Clone)]
pub struct InitiateRequest {
    pub project_title: String,
    pub user_prompt: String,
    pub references: Vec<String>,
    pub raw_data: String,
}

/// Runs the research pipeline and tracks project state
pub struct Coordinator {
    store: Mutex<ProjectStore>,
    transport: Arc<dyn ToolTransport>,
}

impl Coordinator {
    pub fn new(transport: Arc<dyn ToolTransport>) -> Self {
        Self {
            store: Mutex::new(ProjectStore::new()),
            transport,
        }
    }

    /// Look up a stored project (test and inspection hook)
    pub async fn project(&self, project_id: &str) -> Option<ProjectState> {
        self.store.lock().await.get(project_id).cloned()
    }

    /// Create a project and drive it through the pipeline
    pub async fn initiate(&self, request: InitiateRequest) -> Value {
        let project_id = generate_project_id();
        let mut project = ProjectState::new(
            project_id.clone(),
            request.project_title.clone(),
            request.user_prompt.clone(),
            request.references.clone(),
            request.raw_data.clone(),
        );

        let response = match self.run_pipeline(&mut project).await {
            Ok(()) => {
                let status = Status::from_errors(&project.errors);
                info!(
                    project_id = %project.project_id,
                    stage = %project.workflow_stage,
                    status = %status,
                    "pipeline finished"
                );
                serde_json::json!({
                    "status": status,
                    "project_id": project.project_id,
                    "workflow_stage": project.workflow_stage,
                    "next_steps": project.workflow_stage.next_steps(),
                    "errors": project.errors,
                    "log": project.log,
                })
            }
            Err(e) => {
                warn!(project_id = %project.project_id, error = %e, "pipeline aborted");
                project.errors.push(format!("Workflow error: {}", e));
                project.log.push(format!("Error occurred: {}", e));
                serde_json::json!({
                    "status": Status::Error,
                    "project_id": project.project_id,
                    "workflow_stage": project.workflow_stage,
                    "next_steps": ["Fix errors and retry"],
                    "errors": project.errors,
                    "log": project.log,
                })
            }
        };

        self.store.lock().await.insert(project);
        response
    }

    async fn run_pipeline(&self, project: &mut ProjectState) -> Result<()> {
        self.run_research_design(project).await?;
        self.run_data_processing(project).await;
        self.run_code_generation(project).await;
        Ok(())
    }

    /// Step 1. A transport failure here escapes and aborts the pipeline.
    async fn run_research_design(&self, project: &mut ProjectState) -> Result<()> {
        project.log.push("Calling Research Initiator Developer...".to_string());
        let payload = self
            .transport
            .call(
                "initiator",
                "refine",
                serde_json::json!({
                    "project_id": project.project_id,
                    "prompt": project.user_prompt,
                    "references": project.references,
                }),
            )
            .await?;

        if payload["status"] == "success" {
            project.refined_question = payload["refined_question"].as_str().map(String::from);
            project.hypotheses = serde_json::from_value(payload["hypotheses"].clone()).ok();
            project.operational_definitions = Some(payload["operational_definitions"].clone());
            project.lit_review_notes = payload["lit_review_notes"].as_str().map(String::from);
            project.advance(WorkflowStage::ResearchDesignComplete);
            project
                .log
                .push("Research design completed successfully".to_string());
        } else {
            project
                .errors
                .push(format!("Research design failed: {}", joined_errors(&payload)));
        }
        Ok(())
    }

    /// Step 2. Runs only once the design is complete; an unreachable server
    /// is recorded and skipped.
    async fn run_data_processing(&self, project: &mut ProjectState) {
        if project.workflow_stage != WorkflowStage::ResearchDesignComplete {
            return;
        }

        project.log.push("Calling Data Processor...".to_string());
        let result = self
            .transport
            .call(
                "wrangler",
                "process",
                serde_json::json!({
                    "project_id": project.project_id,
                    "refined_question": project.refined_question,
                    "hypotheses": project.hypotheses,
                    "operational_definitions": project.operational_definitions,
                    "raw_data": project.raw_data_path,
                }),
            )
            .await;

        match result {
            Ok(payload) => {
                if payload["status"] == "success" {
                    project.cleaned_data_path = payload["cleaned_data"].as_str().map(String::from);
                    project.processing_log =
                        serde_json::from_value(payload["processing_log"].clone()).ok();
                    project.decision_rationale =
                        payload["decision_rationale"].as_str().map(String::from);
                    project.advance(WorkflowStage::DataProcessingComplete);
                    project
                        .log
                        .push("Data processing completed successfully".to_string());
                } else {
                    project
                        .errors
                        .push(format!("Data processing failed: {}", joined_errors(&payload)));
                }
            }
            Err(e) => {
                project
                    .errors
                    .push(format!("Data processor not available: {}", e));
                project
                    .log
                    .push("Skipping data processing - server not available".to_string());
            }
        }
    }

    /// Step 3. Runs whether or not data processing succeeded; without a
    /// cleaned dataset the scripts target the raw data path.
    async fn run_code_generation(&self, project: &mut ProjectState) {
        if project.workflow_stage != WorkflowStage::DataProcessingComplete
            && project.workflow_stage != WorkflowStage::ResearchDesignComplete
        {
            return;
        }

        project.log.push("Calling Code Generator...".to_string());
        let cleaned_data = project
            .cleaned_data_path
            .clone()
            .unwrap_or_else(|| project.raw_data_path.clone());
        let result = self
            .transport
            .call(
                "codegen",
                "generate",
                serde_json::json!({
                    "project_id": project.project_id,
                    "cleaned_data": cleaned_data,
                    "hypotheses": project.hypotheses,
                    "analysis_plan": DEFAULT_ANALYSIS_PLAN,
                }),
            )
            .await;

        match result {
            Ok(payload) => {
                if payload["status"] == "success" {
                    project.analysis_scripts = Some(payload["analysis_scripts"].clone());
                    project.exploratory_findings = Some(payload["exploratory_findings"].clone());
                    project.advance(WorkflowStage::CodeGenerationComplete);
                    project
                        .log
                        .push("Code generation completed successfully".to_string());
                } else {
                    project
                        .errors
                        .push(format!("Code generation failed: {}", joined_errors(&payload)));
                }
            }
            Err(e) => {
                project
                    .errors
                    .push(format!("Code generator not available: {}", e));
            }
        }
    }
}

/// Comma-joined `errors` field of a downstream payload
fn joined_errors(payload: &Value) -> String {
    payload["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    fn request() -> InitiateRequest {
        InitiateRequest {
            project_title: "Remote work study".to_string(),
            user_prompt: "Does remote work affect productivity?".to_string(),
            references: vec!["smith2023.pdf".to_string()],
            raw_data: "data/raw.csv".to_string(),
        }
    }

    fn refine_ok() -> Value {
        serde_json::json!({
            "status": "success",
            "refined_question": "Refined version of: Does remote work affect productivity?",
            "hypotheses": ["H1: remote work is positively correlated with outcome X."],
            "operational_definitions": {"remote_work": "Measured by survey score Y."},
            "lit_review_notes": "Preliminary notes.",
            "errors": [],
            "log": [],
        })
    }

    fn process_ok() -> Value {
        serde_json::json!({
            "status": "success",
            "cleaned_data": "processed_data/p_cleaned.csv",
            "processing_log": ["Initial data: 6 rows"],
            "decision_rationale": "Data processing decisions...",
            "errors": [],
            "log": [],
        })
    }

    fn generate_ok() -> Value {
        serde_json::json!({
            "status": "success",
            "analysis_scripts": {"01_eda_p.py": "print('eda')"},
            "exploratory_findings": {"description": "ready"},
            "errors": [],
            "log": [],
        })
    }

    #[tokio::test]
    async fn test_full_pipeline_success() {
        let transport = MockTransport::new()
            .with_payload("initiator", "refine", refine_ok())
            .with_payload("wrangler", "process", process_ok())
            .with_payload("codegen", "generate", generate_ok());
        let coordinator = Coordinator::new(Arc::new(transport));

        let response = coordinator.initiate(request()).await;

        assert_eq!(response["status"], "success");
        assert_eq!(response["workflow_stage"], "code_generation_complete");
        assert_eq!(
            response["next_steps"],
            serde_json::json!(["Execute analysis scripts", "Generate research report"])
        );
        assert!(response["errors"].as_array().unwrap().is_empty());

        let log: Vec<String> = serde_json::from_value(response["log"].clone()).unwrap();
        assert!(log.iter().any(|l| l == "Research design completed successfully"));
        assert!(log.iter().any(|l| l == "Data processing completed successfully"));
        assert!(log.iter().any(|l| l == "Code generation completed successfully"));

        // the project is retained with its accumulated state
        let project_id = response["project_id"].as_str().unwrap();
        let project = coordinator.project(project_id).await.unwrap();
        assert_eq!(project.workflow_stage, WorkflowStage::CodeGenerationComplete);
        assert_eq!(
            project.cleaned_data_path.as_deref(),
            Some("processed_data/p_cleaned.csv")
        );
    }

    #[tokio::test]
    async fn test_unreachable_data_processor_is_skipped_not_fatal() {
        let transport = MockTransport::new()
            .with_payload("initiator", "refine", refine_ok())
            .with_unavailable("wrangler", "process", "connection refused")
            .with_payload("codegen", "generate", generate_ok());
        let coordinator = Coordinator::new(Arc::new(transport));

        let response = coordinator.initiate(request()).await;

        assert_eq!(response["status"], "partial_success");
        assert_eq!(response["workflow_stage"], "code_generation_complete");
        let errors: Vec<String> = serde_json::from_value(response["errors"].clone()).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Data processor not available:"));

        let log: Vec<String> = serde_json::from_value(response["log"].clone()).unwrap();
        assert!(log
            .iter()
            .any(|l| l == "Skipping data processing - server not available"));
    }

    #[tokio::test]
    async fn test_reported_data_processing_failure_records_error_and_continues() {
        let transport = Arc::new(
            MockTransport::new()
                .with_payload("initiator", "refine", refine_ok())
                .with_payload(
                    "wrangler",
                    "process",
                    serde_json::json!({
                        "status": "error",
                        "errors": ["Failed to write data file: disk full"],
                        "log": [],
                    }),
                )
                .with_payload("codegen", "generate", generate_ok()),
        );
        let coordinator = Coordinator::new(transport.clone());

        let response = coordinator.initiate(request()).await;

        assert_eq!(response["status"], "partial_success");
        assert_eq!(response["workflow_stage"], "code_generation_complete");
        let errors: Vec<String> = serde_json::from_value(response["errors"].clone()).unwrap();
        assert_eq!(
            errors,
            vec!["Data processing failed: Failed to write data file: disk full"]
        );

        // the server answered, so the skipped-because-unreachable note is absent
        let log: Vec<String> = serde_json::from_value(response["log"].clone()).unwrap();
        assert!(!log
            .iter()
            .any(|l| l == "Skipping data processing - server not available"));

        // code generation still ran, targeting the raw dataset
        let calls = transport.calls();
        let (_, _, generate_args) = calls
            .iter()
            .find(|(server, _, _)| server == "codegen")
            .unwrap();
        assert_eq!(generate_args["cleaned_data"], "data/raw.csv");
    }

    #[tokio::test]
    async fn test_codegen_falls_back_to_raw_data_when_cleaning_skipped() {
        let transport = Arc::new(
            MockTransport::new()
                .with_payload("initiator", "refine", refine_ok())
                .with_unavailable("wrangler", "process", "connection refused")
                .with_payload("codegen", "generate", generate_ok()),
        );
        let coordinator = Coordinator::new(transport.clone());
        coordinator.initiate(request()).await;

        let calls = transport.calls();
        let (_, _, generate_args) = calls
            .iter()
            .find(|(server, _, _)| server == "codegen")
            .unwrap();
        assert_eq!(generate_args["cleaned_data"], "data/raw.csv");
        assert_eq!(
            generate_args["analysis_plan"],
            serde_json::json!([
                "descriptive statistics",
                "correlation analysis",
                "hypothesis testing"
            ])
        );
    }

    #[tokio::test]
    async fn test_failed_research_design_halts_pipeline() {
        let transport = Arc::new(MockTransport::new().with_payload(
            "initiator",
            "refine",
            serde_json::json!({
                "status": "error",
                "errors": ["prompt must not be empty"],
                "log": [],
            }),
        ));
        let coordinator = Coordinator::new(transport.clone());

        let response = coordinator.initiate(request()).await;

        assert_eq!(response["status"], "partial_success");
        assert_eq!(response["workflow_stage"], "initiated");
        assert_eq!(
            response["next_steps"],
            serde_json::json!(["Complete research design"])
        );
        let errors: Vec<String> = serde_json::from_value(response["errors"].clone()).unwrap();
        assert_eq!(
            errors,
            vec!["Research design failed: prompt must not be empty"]
        );

        // neither downstream server was contacted
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_initiator_is_a_workflow_error() {
        let transport =
            MockTransport::new().with_unavailable("initiator", "refine", "spawn failed");
        let coordinator = Coordinator::new(Arc::new(transport));

        let response = coordinator.initiate(request()).await;

        assert_eq!(response["status"], "error");
        assert_eq!(response["workflow_stage"], "initiated");
        assert_eq!(
            response["next_steps"],
            serde_json::json!(["Fix errors and retry"])
        );
        let errors: Vec<String> = serde_json::from_value(response["errors"].clone()).unwrap();
        assert!(errors[0].starts_with("Workflow error:"));
    }

    #[tokio::test]
    async fn test_codegen_structured_failure_keeps_stage() {
        let transport = MockTransport::new()
            .with_payload("initiator", "refine", refine_ok())
            .with_payload("wrangler", "process", process_ok())
            .with_payload(
                "codegen",
                "generate",
                serde_json::json!({
                    "status": "error",
                    "errors": ["template missing"],
                    "log": [],
                }),
            );
        let coordinator = Coordinator::new(Arc::new(transport));

        let response = coordinator.initiate(request()).await;

        assert_eq!(response["status"], "partial_success");
        assert_eq!(response["workflow_stage"], "data_processing_complete");
        assert_eq!(
            response["next_steps"],
            serde_json::json!(["Generate analysis code"])
        );
        let errors: Vec<String> = serde_json::from_value(response["errors"].clone()).unwrap();
        assert_eq!(errors, vec!["Code generation failed: template missing"]);
    }

    #[tokio::test]
    async fn test_each_initiate_creates_a_distinct_project() {
        let transport = MockTransport::new()
            .with_payload("initiator", "refine", refine_ok())
            .with_payload("wrangler", "process", process_ok())
            .with_payload("codegen", "generate", generate_ok());
        let coordinator = Coordinator::new(Arc::new(transport));

        let first = coordinator.initiate(request()).await;
        let second = coordinator.initiate(request()).await;
        assert_ne!(first["project_id"], second["project_id"]);
    }
}
