//! The `generate` tool

use async_trait::async_trait;
use scholar_core::Status;
use scholar_protocol::{ToolDefinition, ToolHandler};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::kinds::{classify, AnalysisKind};
use crate::templates::render;

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    project_id: String,
    cleaned_data: String,
    hypotheses: Vec<String>,
    analysis_plan: Vec<String>,
}

/// Generates analysis scripts from the analysis plan and hypotheses
pub struct GenerateTool;

#[async_trait]
impl ToolHandler for GenerateTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "generate".to_string(),
            description: "Generates analysis scripts based on the analysis plan and hypotheses."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "project_id": { "type": "string" },
                    "cleaned_data": { "type": "string" },
                    "hypotheses": { "type": "array", "items": { "type": "string" } },
                    "analysis_plan": { "type": "array", "items": { "type": "string" } },
                },
                "required": ["project_id", "cleaned_data", "hypotheses", "analysis_plan"],
            }),
        }
    }

    async fn call(&self, arguments: Value) -> Value {
        let mut log: Vec<String> = Vec::new();

        let request: GenerateRequest = match serde_json::from_value(arguments) {
            Ok(request) => request,
            Err(e) => {
                log.push("Error in 'generate' tool: malformed arguments".to_string());
                return self.validation_payload(vec![e.to_string()], log);
            }
        };

        log.push(format!(
            "Processing 'generate' request for project_id: {}",
            request.project_id
        ));
        log.push(format!(
            "Generating scripts for analysis plan: {}",
            request.analysis_plan.join(", ")
        ));

        let mut scripts = serde_json::Map::new();
        for step in &request.analysis_plan {
            let kind = classify(step);
            let filename = kind.script_name(step, &request.project_id);
            let script = render(
                kind,
                &request.cleaned_data,
                &request.hypotheses,
                step,
                &request.project_id,
            );
            log.push(generation_log_line(kind, &filename, step));
            scripts.insert(filename, Value::String(script));
        }

        let mut description = format!(
            "Initial EDA on {} suggests data is ready for analysis. Key variables checked.",
            request.cleaned_data
        );
        if request
            .analysis_plan
            .iter()
            .any(|step| step.to_lowercase().contains("outlier"))
        {
            description.push_str(" Outlier detection explicitly requested.");
        }

        log.push("Script generation and exploratory findings summary completed.".to_string());

        info!(
            project_id = %request.project_id,
            scripts = scripts.len(),
            "script generation complete"
        );

        serde_json::json!({
            "status": Status::Success,
            "analysis_scripts": scripts,
            "exploratory_findings": {
                "description": description,
                "outliers": "Outlier detection was part of the EDA script. Check script output for details.",
            },
            "log": log,
            "errors": [],
        })
    }

    fn validation_payload(&self, errors: Vec<String>, log: Vec<String>) -> Value {
        serde_json::json!({
            "status": Status::Error,
            "analysis_scripts": {},
            "exploratory_findings": { "description": "Error during script generation." },
            "log": log,
            "errors": errors,
        })
    }
}

fn generation_log_line(kind: AnalysisKind, filename: &str, step: &str) -> String {
    match kind {
        AnalysisKind::Eda => format!("Generated comprehensive Python EDA script: {}", filename),
        AnalysisKind::Correlation => format!("Generated correlation analysis script: {}", filename),
        AnalysisKind::Regression => format!("Generated regression analysis script: {}", filename),
        AnalysisKind::TTest => format!("Generated t-test script: {}", filename),
        AnalysisKind::Anova => format!("Generated ANOVA script: {}", filename),
        AnalysisKind::ChiSquare => format!("Generated chi-square test script: {}", filename),
        AnalysisKind::Custom => format!("Generated custom analysis script for: {}", step),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(plan: &[&str]) -> Value {
        serde_json::json!({
            "project_id": "proj_1_abc",
            "cleaned_data": "processed_data/proj_1_abc_cleaned.csv",
            "hypotheses": ["H1: VariableA positively affects VariableB"],
            "analysis_plan": plan,
        })
    }

    #[tokio::test]
    async fn test_generate_one_script_per_plan_step() {
        let payload = GenerateTool
            .call(request(&[
                "descriptive statistics",
                "correlation analysis",
                "hypothesis testing",
            ]))
            .await;

        assert_eq!(payload["status"], "success");
        let scripts = payload["analysis_scripts"].as_object().unwrap();
        assert_eq!(scripts.len(), 3);
        assert!(scripts.contains_key("01_eda_proj_1_abc.py"));
        assert!(scripts.contains_key("02_correlation_proj_1_abc.py"));
        assert!(scripts.contains_key("custom_hypothesis_testing_proj_1_abc.py"));
    }

    #[tokio::test]
    async fn test_scripts_reference_cleaned_data_path() {
        let payload = GenerateTool.call(request(&["eda"])).await;
        let scripts = payload["analysis_scripts"].as_object().unwrap();
        let script = scripts["01_eda_proj_1_abc.py"].as_str().unwrap();
        assert!(script.contains("processed_data/proj_1_abc_cleaned.csv"));
        assert!(script.contains("1. H1: VariableA positively affects VariableB"));
    }

    #[tokio::test]
    async fn test_outlier_request_noted_in_findings() {
        let payload = GenerateTool
            .call(request(&["eda with outlier detection"]))
            .await;
        let description = payload["exploratory_findings"]["description"]
            .as_str()
            .unwrap();
        assert!(description.ends_with("Outlier detection explicitly requested."));
    }

    #[tokio::test]
    async fn test_findings_without_outlier_request() {
        let payload = GenerateTool.call(request(&["eda"])).await;
        let description = payload["exploratory_findings"]["description"]
            .as_str()
            .unwrap();
        assert!(description.ends_with("Key variables checked."));
    }

    #[tokio::test]
    async fn test_log_records_plan_and_scripts() {
        let payload = GenerateTool.call(request(&["anova"])).await;
        let log: Vec<String> = serde_json::from_value(payload["log"].clone()).unwrap();
        assert!(log
            .iter()
            .any(|l| l == "Generating scripts for analysis plan: anova"));
        assert!(log
            .iter()
            .any(|l| l == "Generated ANOVA script: 05_anova_proj_1_abc.py"));
    }
}
