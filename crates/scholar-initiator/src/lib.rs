//! # scholar-initiator
//!
//! The research design server. Exposes one tool, `refine`, which derives a
//! refined question, a hypothesis set, per-concept operational definitions,
//! and literature-review notes from the caller's prompt and references.

mod refine;
mod tool;

pub use refine::{develop_design, ResearchDesign};
pub use tool::RefineTool;

use scholar_core::Result;
use scholar_protocol::ToolRegistry;
use std::sync::Arc;

/// Build the initiator server's tool registry
pub fn registry() -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(RefineTool))?;
    Ok(registry)
}
