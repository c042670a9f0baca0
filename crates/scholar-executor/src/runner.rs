//! Script execution seam
//!
//! `ScriptRunner` separates the run tool's bookkeeping from real process
//! spawning so execution outcomes can be scripted in tests. The real
//! implementation resolves the interpreter command, spawns it in the
//! project working directory, and enforces the wall-clock deadline.

use async_trait::async_trait;
use scholar_core::{Result, ScholarError};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Captured output of one executed script
#[derive(Debug, Clone, Default)]
pub struct ScriptOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Executes one script file inside a working directory
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    async fn execute(
        &self,
        interpreter: crate::interpreter::Interpreter,
        filename: &str,
        workdir: &Path,
        timeout: Duration,
    ) -> Result<ScriptOutput>;
}

/// Real runner backed by `tokio::process::Command`
pub struct ProcessRunner;

impl ProcessRunner {
    async fn probe(command: &str) -> bool {
        Command::new(command)
            .arg("--version")
            .output()
            .await
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    async fn resolve_command(interpreter: crate::interpreter::Interpreter) -> Result<&'static str> {
        use crate::interpreter::Interpreter;
        match interpreter {
            Interpreter::Python => {
                if Self::probe("python").await {
                    Ok("python")
                } else if Self::probe("python3").await {
                    Ok("python3")
                } else {
                    Err(ScholarError::ResourceUnavailable(
                        "Python is not available in the system".to_string(),
                    ))
                }
            }
            Interpreter::R => {
                if Self::probe("Rscript").await {
                    Ok("Rscript")
                } else {
                    Err(ScholarError::ResourceUnavailable(
                        "R is not available in the system".to_string(),
                    ))
                }
            }
            Interpreter::Node => Ok("node"),
        }
    }
}

#[async_trait]
impl ScriptRunner for ProcessRunner {
    async fn execute(
        &self,
        interpreter: crate::interpreter::Interpreter,
        filename: &str,
        workdir: &Path,
        timeout: Duration,
    ) -> Result<ScriptOutput> {
        let command = Self::resolve_command(interpreter).await?;
        debug!(command, filename, workdir = %workdir.display(), "executing script");

        let output = tokio::time::timeout(
            timeout,
            Command::new(command)
                .arg(filename)
                .current_dir(workdir)
                .output(),
        )
        .await
        .map_err(|_| ScholarError::CallTimeout {
            name: filename.to_string(),
            seconds: timeout.as_secs(),
        })??;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(ScholarError::Other(format!(
                "script exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(ScriptOutput { stdout, stderr })
    }
}

/// Test runner with scripted per-filename outcomes
#[derive(Default)]
pub struct MockScriptRunner {
    outcomes: Mutex<HashMap<String, std::result::Result<ScriptOutput, String>>>,
}

impl MockScriptRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful run for a filename
    pub fn with_output(self, filename: &str, stdout: &str, stderr: &str) -> Self {
        self.outcomes.lock().unwrap().insert(
            filename.to_string(),
            Ok(ScriptOutput {
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }),
        );
        self
    }

    /// Script a failed run for a filename
    pub fn with_failure(self, filename: &str, message: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .insert(filename.to_string(), Err(message.to_string()));
        self
    }
}

#[async_trait]
impl ScriptRunner for MockScriptRunner {
    async fn execute(
        &self,
        _interpreter: crate::interpreter::Interpreter,
        filename: &str,
        _workdir: &Path,
        _timeout: Duration,
    ) -> Result<ScriptOutput> {
        match self.outcomes.lock().unwrap().get(filename) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(message)) => Err(ScholarError::Other(message.clone())),
            None => Err(ScholarError::Other(format!(
                "no scripted outcome for {}",
                filename
            ))),
        }
    }
}
