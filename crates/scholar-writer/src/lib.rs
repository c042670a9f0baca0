//! # scholar-writer
//!
//! The research writer server. Exposes one tool, `compose`, which assembles
//! the final markdown report from the project's design, results, and optional
//! narrative inputs, then saves it under the reports directory.

mod sections;
mod tool;

pub use tool::ComposeTool;

use scholar_core::{Result, ScholarConfig};
use scholar_protocol::ToolRegistry;
use std::sync::Arc;

/// Build the writer's tool registry
pub fn registry(config: ScholarConfig) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(ComposeTool::new(config)))?;
    Ok(registry)
}
