//! The `run` tool
//!
//! Writes each script into the per-project working directory, executes it
//! with its selected interpreter under the script deadline, and collects
//! stdout/stderr plus any files the scripts produced. A failing script is
//! recorded and the rest still run; the overall status degrades to
//! `partial_success` instead of aborting.

use async_trait::async_trait;
use chrono::Utc;
use scholar_core::{ScholarConfig, Status};
use scholar_protocol::{ToolDefinition, ToolHandler};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::interpreter::select;
use crate::runner::{ProcessRunner, ScriptRunner};

fn default_environment() -> String {
    "python".to_string()
}

#[derive(Debug, Deserialize)]
struct RunRequest {
    project_id: String,
    /// filename -> script content, executed in filename order
    scripts: BTreeMap<String, String>,
    data: String,
    #[serde(default = "default_environment")]
    environment: String,
}

/// Executes analysis scripts in a specified environment
pub struct RunTool {
    config: ScholarConfig,
    runner: Arc<dyn ScriptRunner>,
}

impl RunTool {
    pub fn new(config: ScholarConfig) -> Self {
        Self::with_runner(config, Arc::new(ProcessRunner))
    }

    pub fn with_runner(config: ScholarConfig, runner: Arc<dyn ScriptRunner>) -> Self {
        Self { config, runner }
    }

    fn failure(&self, message: String, log: &mut Vec<String>) -> Value {
        log.push(format!("Error in 'run' tool: {}", message));
        self.validation_payload(vec![message], log.clone())
    }

    async fn run(&self, request: &RunRequest, log: &mut Vec<String>) -> Value {
        log.push(format!(
            "Starting code execution for project: {}",
            request.project_id
        ));

        let workdir = self.config.project_workdir(&request.project_id);
        if let Err(e) = tokio::fs::create_dir_all(&workdir).await {
            return self.failure(format!("Failed to create working directory: {}", e), log);
        }
        log.push(format!(
            "Created working directory: {}",
            workdir.display()
        ));

        let deadline = Duration::from_secs(self.config.script_timeout_secs);
        let mut execution_logs: Vec<String> = Vec::new();
        let mut output_files: Vec<String> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        for (filename, content) in &request.scripts {
            log.push(format!("Processing script: {}", filename));

            if let Err(e) = tokio::fs::write(workdir.join(filename), content).await {
                let message = format!("Failed to execute {}: {}", filename, e);
                errors.push(message.clone());
                execution_logs.push(message.clone());
                log.push(message);
                continue;
            }
            execution_logs.push(format!("Created script file: {}", filename));

            let selection = select(&request.environment, filename);
            match self
                .runner
                .execute(selection.interpreter, filename, &workdir, deadline)
                .await
            {
                Ok(output) => {
                    execution_logs.push(selection.executed_line(filename));
                    if !output.stdout.is_empty() {
                        execution_logs.push(format!("STDOUT from {}:", filename));
                        execution_logs.push(output.stdout);
                    }
                    if !output.stderr.is_empty() {
                        execution_logs.push(format!("STDERR from {}:", filename));
                        execution_logs.push(output.stderr);
                    }
                    collect_outputs(&workdir, &request.scripts, &mut output_files).await;
                }
                Err(e) => {
                    let message = format!("Failed to execute {}: {}", filename, e);
                    warn!(script = filename, error = %e, "script execution failed");
                    errors.push(message.clone());
                    execution_logs.push(message.clone());
                    log.push(message);
                }
            }
        }

        let summary_path = workdir.join("execution_summary.txt");
        let summary = execution_summary(request, &output_files, &execution_logs, &errors);
        if let Err(e) = tokio::fs::write(&summary_path, summary).await {
            return self.failure(format!("Failed to write execution summary: {}", e), log);
        }
        output_files.push(summary_path.display().to_string());

        log.push(format!(
            "Execution completed. Generated {} output files.",
            output_files.len()
        ));

        let status = Status::from_errors(&errors);
        info!(project_id = %request.project_id, status = %status, failed = errors.len(), "execution complete");

        serde_json::json!({
            "status": status,
            "execution_logs": execution_logs,
            "output_files": output_files,
            "errors": errors,
            "log": log,
        })
    }
}

/// Pick up files the scripts produced: everything in the working directory
/// that is not a script file and was not collected after an earlier script
async fn collect_outputs(
    workdir: &Path,
    scripts: &BTreeMap<String, String>,
    output_files: &mut Vec<String>,
) {
    let mut entries = match tokio::fs::read_dir(workdir).await {
        Ok(entries) => entries,
        Err(_) => return,
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name().to_string_lossy().to_string();
        if scripts.contains_key(&name) || name == "execution_summary.txt" {
            continue;
        }
        let path = workdir.join(&name).display().to_string();
        if !output_files.contains(&path) {
            output_files.push(path);
        }
    }
}

fn execution_summary(
    request: &RunRequest,
    output_files: &[String],
    execution_logs: &[String],
    errors: &[String],
) -> String {
    let bullet = |items: &mut dyn Iterator<Item = &String>| {
        items
            .map(|item| format!("- {}", item))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Execution Summary for Project: {}\n\
         Timestamp: {}\n\
         Environment: {}\n\
         Data File: {}\n\n\
         Scripts Executed:\n{}\n\n\
         Output Files Generated:\n{}\n\n\
         Execution Logs:\n{}\n\n\
         {}",
        request.project_id,
        Utc::now().to_rfc3339(),
        request.environment,
        request.data,
        bullet(&mut request.scripts.keys()),
        bullet(&mut output_files.iter()),
        execution_logs.join("\n"),
        if errors.is_empty() {
            "No errors occurred.".to_string()
        } else {
            format!("Errors:\n{}", errors.join("\n"))
        },
    )
}

#[async_trait]
impl ToolHandler for RunTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "run".to_string(),
            description: "Executes analysis scripts in a specified environment".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "project_id": { "type": "string" },
                    "scripts": {
                        "type": "object",
                        "additionalProperties": { "type": "string" },
                    },
                    "data": { "type": "string" },
                    "environment": {
                        "type": "string",
                        "enum": ["python", "r", "node"],
                        "default": "python",
                    },
                },
                "required": ["project_id", "scripts", "data"],
            }),
        }
    }

    async fn call(&self, arguments: Value) -> Value {
        let mut log: Vec<String> = Vec::new();

        let request: RunRequest = match serde_json::from_value(arguments) {
            Ok(request) => request,
            Err(e) => return self.failure(format!("malformed arguments: {}", e), &mut log),
        };

        self.run(&request, &mut log).await
    }

    fn validation_payload(&self, errors: Vec<String>, log: Vec<String>) -> Value {
        serde_json::json!({
            "status": Status::Error,
            "execution_logs": [],
            "output_files": [],
            "errors": errors,
            "log": log,
        })
    }
}
