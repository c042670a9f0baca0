//! # scholar-executor
//!
//! The code execution server. Exposes one tool, `run`, which writes the
//! generated scripts into a per-project working directory, executes each
//! with an interpreter chosen by environment or extension, and collects
//! logs and output files. Individual script failures never abort the batch.

mod interpreter;
mod runner;
mod tool;

pub use interpreter::{select, Interpreter, Selection};
pub use runner::{MockScriptRunner, ProcessRunner, ScriptOutput, ScriptRunner};
pub use tool::RunTool;

use scholar_core::{Result, ScholarConfig};
use scholar_protocol::ToolRegistry;
use std::sync::Arc;

/// Build the code executor's tool registry
pub fn registry(config: ScholarConfig) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(RunTool::new(config)))?;
    Ok(registry)
}
