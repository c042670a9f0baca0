//! The `process` tool
//!
//! Reads the raw dataset (falling back to a bundled sample when the path is
//! unreadable), runs quality analysis and cleaning, writes the cleaned CSV
//! and quality report under the processed-data root, and returns the paths
//! plus a human-readable decision rationale.

use async_trait::async_trait;
use scholar_core::{ScholarConfig, Status};
use scholar_protocol::{ToolDefinition, ToolHandler};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::clean::clean;
use crate::quality::QualityReport;
use crate::table::Table;

/// Stand-in dataset used when the raw data path cannot be read
const SAMPLE_DATA: &str = "\
id,productivity_score,satisfaction_rating,work_location,hours_worked
1,85,4.2,remote,40
2,78,3.8,office,42
3,92,4.5,remote,38
4,73,3.2,office,45
5,88,4.1,remote,39";

#[derive(Debug, Deserialize)]
struct ProcessRequest {
    project_id: String,
    refined_question: String,
    hypotheses: Vec<String>,
    operational_definitions: serde_json::Map<String, Value>,
    raw_data: String,
}

/// Processes raw data and prepares datasets for analysis
pub struct ProcessTool {
    config: ScholarConfig,
}

impl ProcessTool {
    pub fn new(config: ScholarConfig) -> Self {
        Self { config }
    }

    async fn process(&self, request: &ProcessRequest, log: &mut Vec<String>) -> Value {
        log.push(format!(
            "Starting data processing for project: {}",
            request.project_id
        ));

        let raw = match tokio::fs::read_to_string(&request.raw_data).await {
            Ok(raw) => {
                log.push(format!(
                    "Successfully read raw data from: {}",
                    request.raw_data
                ));
                raw
            }
            Err(e) => {
                warn!(path = %request.raw_data, error = %e, "raw data unreadable, substituting sample");
                log.push("Raw data file not found, using sample data for demonstration".to_string());
                SAMPLE_DATA.to_string()
            }
        };

        let mut steps: Vec<String> = Vec::new();
        let mut decisions: Vec<String> = Vec::new();

        let initial_rows = raw.lines().filter(|line| !line.trim().is_empty()).count();
        steps.push(format!("Initial data: {} rows", initial_rows));

        let mut table = Table::parse(&raw);
        steps.push(format!(
            "After removing empty rows: {} rows",
            if table.headers.is_empty() {
                0
            } else {
                table.row_count() + 1
            }
        ));
        decisions.push("Removed empty rows to ensure data quality".to_string());

        if !table.headers.is_empty() {
            steps.push(format!("Detected columns: {}", table.headers.join(", ")));

            let missing: Vec<&str> = request
                .operational_definitions
                .keys()
                .map(String::as_str)
                .filter(|key| !table.headers.iter().any(|h| h == key))
                .collect();
            if !missing.is_empty() {
                steps.push(format!(
                    "Warning: Missing expected columns: {}",
                    missing.join(", ")
                ));
                decisions.push(format!(
                    "Proceeding without columns: {} - may need manual data mapping",
                    missing.join(", ")
                ));
            }
        }

        let report = QualityReport::analyze(&table);
        steps.extend(report.summary_lines());

        let outcome = clean(&mut table);
        steps.push(format!(
            "Removed {} duplicate rows and {} incomplete rows",
            outcome.duplicates_removed, outcome.incomplete_removed
        ));
        if outcome.duplicates_removed > 0 {
            decisions.push("Removed duplicate rows to avoid double-counting observations".to_string());
        }
        if outcome.incomplete_removed > 0 {
            decisions.push("Removed rows with missing values to keep analyses comparable".to_string());
        }

        for (index, hypothesis) in request.hypotheses.iter().enumerate() {
            let head: String = hypothesis.chars().take(50).collect();
            steps.push(format!(
                "Processing for hypothesis {}: {}...",
                index + 1,
                head
            ));
            decisions.push("Applied standard cleaning procedures for hypothesis testing".to_string());
        }

        let cleaned_path = self.config.cleaned_data_path(&request.project_id);
        let quality_path = self.config.quality_report_path(&request.project_id);

        let quality_json = match serde_json::to_string_pretty(&report) {
            Ok(json) => json,
            Err(e) => return self.failure(format!("Failed to serialize quality report: {}", e), log),
        };

        if let Some(dir) = cleaned_path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(dir).await {
                return self.failure(format!("Failed to write data file: {}", e), log);
            }
        }
        if let Err(e) = tokio::fs::write(&cleaned_path, table.to_csv()).await {
            return self.failure(format!("Failed to write data file: {}", e), log);
        }
        log.push(format!("Cleaned data written to: {}", cleaned_path.display()));

        if let Err(e) = tokio::fs::write(&quality_path, quality_json).await {
            return self.failure(format!("Failed to write data file: {}", e), log);
        }
        log.push(format!(
            "Quality report written to: {}",
            quality_path.display()
        ));

        log.extend(steps.iter().cloned());

        let rationale = rationale_text(request, &decisions);

        info!(project_id = %request.project_id, rows = table.row_count(), "data processing complete");

        serde_json::json!({
            "status": Status::Success,
            "cleaned_data": cleaned_path.display().to_string(),
            "quality_report": quality_path.display().to_string(),
            "processing_log": steps,
            "decision_rationale": rationale,
            "errors": [],
            "log": log,
        })
    }

    fn failure(&self, message: String, log: &mut Vec<String>) -> Value {
        log.push(format!("Error in 'process' tool: {}", message));
        self.validation_payload(vec![message], log.clone())
    }
}

fn rationale_text(request: &ProcessRequest, decisions: &[String]) -> String {
    let numbered = |items: &[String]| {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let definitions = request
        .operational_definitions
        .iter()
        .map(|(key, value)| format!("- {}: {}", key, value))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Data processing decisions for project {}:\n{}\n\n\
         Processing was guided by the research question: \"{}\"\n\
         and the following hypotheses:\n{}\n\n\
         Operational definitions applied:\n{}",
        request.project_id,
        numbered(decisions),
        request.refined_question,
        numbered(&request.hypotheses),
        definitions,
    )
}

#[async_trait]
impl ToolHandler for ProcessTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "process".to_string(),
            description:
                "Processes raw data and prepares datasets for analysis based on research design"
                    .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "project_id": { "type": "string" },
                    "refined_question": { "type": "string" },
                    "hypotheses": { "type": "array", "items": { "type": "string" } },
                    "operational_definitions": { "type": "object" },
                    "raw_data": { "type": "string" },
                },
                "required": [
                    "project_id",
                    "refined_question",
                    "hypotheses",
                    "operational_definitions",
                    "raw_data",
                ],
            }),
        }
    }

    async fn call(&self, arguments: Value) -> Value {
        let mut log: Vec<String> = Vec::new();

        let request: ProcessRequest = match serde_json::from_value(arguments) {
            Ok(request) => request,
            Err(e) => {
                return self.failure(format!("malformed arguments: {}", e), &mut log);
            }
        };

        self.process(&request, &mut log).await
    }

    fn validation_payload(&self, errors: Vec<String>, log: Vec<String>) -> Value {
        serde_json::json!({
            "status": Status::Error,
            "cleaned_data": "",
            "quality_report": "",
            "processing_log": [],
            "decision_rationale": "",
            "errors": errors,
            "log": log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn tool_in(dir: &Path) -> ProcessTool {
        let config = ScholarConfig {
            processed_dir: dir.join("processed_data"),
            ..ScholarConfig::default()
        };
        ProcessTool::new(config)
    }

    fn request(project_id: &str, raw_data: &str) -> Value {
        serde_json::json!({
            "project_id": project_id,
            "refined_question": "Does remote work increase productivity?",
            "hypotheses": ["H1: remote work is positively correlated with outcome X."],
            "operational_definitions": {
                "productivity_score": "Measured by survey score Y.",
            },
            "raw_data": raw_data,
        })
    }

    #[tokio::test]
    async fn test_process_writes_cleaned_csv_and_quality_report() {
        let dir = tempfile::tempdir().unwrap();
        let raw_path = dir.path().join("raw.csv");
        std::fs::write(
            &raw_path,
            "id,productivity_score\n1,85\n2,78\n2,78\n3,\n",
        )
        .unwrap();

        let tool = tool_in(dir.path());
        let payload = tool
            .call(request("proj_1_abc", raw_path.to_str().unwrap()))
            .await;

        assert_eq!(payload["status"], "success");

        let cleaned_path = payload["cleaned_data"].as_str().unwrap();
        let cleaned = std::fs::read_to_string(cleaned_path).unwrap();
        // duplicate and incomplete rows are gone
        assert_eq!(cleaned, "id,productivity_score\n1,85\n2,78");

        let quality_path = payload["quality_report"].as_str().unwrap();
        let report: QualityReport =
            serde_json::from_str(&std::fs::read_to_string(quality_path).unwrap()).unwrap();
        assert_eq!(report.row_count, 4);
        assert_eq!(report.columns.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_raw_data_falls_back_to_sample() {
        let dir = tempfile::tempdir().unwrap();
        let tool = tool_in(dir.path());

        let payload = tool
            .call(request("proj_2_def", "/nonexistent/raw.csv"))
            .await;

        assert_eq!(payload["status"], "success");
        let log: Vec<String> =
            serde_json::from_value(payload["log"].clone()).unwrap();
        assert!(log
            .iter()
            .any(|l| l == "Raw data file not found, using sample data for demonstration"));

        let cleaned =
            std::fs::read_to_string(payload["cleaned_data"].as_str().unwrap()).unwrap();
        assert!(cleaned.starts_with("id,productivity_score"));
        assert_eq!(cleaned.lines().count(), 6);
    }

    #[tokio::test]
    async fn test_missing_expected_columns_warned() {
        let dir = tempfile::tempdir().unwrap();
        let raw_path = dir.path().join("raw.csv");
        std::fs::write(&raw_path, "id,score\n1,85\n").unwrap();

        let tool = tool_in(dir.path());
        let payload = tool
            .call(request("proj_3_ghi", raw_path.to_str().unwrap()))
            .await;

        let steps: Vec<String> =
            serde_json::from_value(payload["processing_log"].clone()).unwrap();
        assert!(steps
            .iter()
            .any(|s| s == "Warning: Missing expected columns: productivity_score"));

        let rationale = payload["decision_rationale"].as_str().unwrap();
        assert!(rationale.contains("Data processing decisions for project proj_3_ghi:"));
        assert!(rationale.contains("Proceeding without columns: productivity_score"));
    }

    #[tokio::test]
    async fn test_rationale_lists_hypotheses_and_definitions() {
        let dir = tempfile::tempdir().unwrap();
        let tool = tool_in(dir.path());
        let payload = tool.call(request("proj_4_jkl", "/nope.csv")).await;

        let rationale = payload["decision_rationale"].as_str().unwrap();
        assert!(rationale.contains("1. H1: remote work is positively correlated"));
        assert!(rationale.contains("- productivity_score: \"Measured by survey score Y.\""));
    }

    #[tokio::test]
    async fn test_validation_payload_keeps_output_fields() {
        let dir = tempfile::tempdir().unwrap();
        let tool = tool_in(dir.path());
        let payload = tool.validation_payload(vec!["bad".to_string()], vec![]);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["cleaned_data"], "");
        assert_eq!(payload["decision_rationale"], "");
    }
}
