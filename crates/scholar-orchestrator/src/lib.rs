//! # scholar-orchestrator
//!
//! The workflow orchestrator. Exposes one tool, `initiate`, which creates a
//! project record and drives it through the research pipeline: design
//! refinement, data processing, and code generation, each on its own tool
//! server. Downstream outages degrade the result instead of failing it,
//! with one exception: an unreachable research designer aborts the run.

mod pipeline;
mod state;
mod tool;
mod transport;

pub use pipeline::{Coordinator, InitiateRequest};
pub use state::{ProjectState, ProjectStore, WorkflowStage};
pub use tool::InitiateTool;
pub use transport::{MockTransport, SubprocessTransport, ToolTransport};

use scholar_core::{Result, ScholarConfig};
use scholar_protocol::ToolRegistry;
use std::sync::Arc;

/// Build the orchestrator's tool registry with the subprocess transport
pub fn registry(config: ScholarConfig) -> Result<ToolRegistry> {
    let transport = Arc::new(SubprocessTransport::new(config));
    let coordinator = Arc::new(Coordinator::new(transport));
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(InitiateTool::new(coordinator)))?;
    Ok(registry)
}
