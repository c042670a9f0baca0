//! # scholar-codegen
//!
//! The code generation server. Exposes one tool, `generate`, which maps each
//! free-text analysis-plan step onto a fixed Python script template (EDA,
//! correlation, regression, t-test, ANOVA, chi-square, or a custom fallback)
//! with the cleaned-data path and hypotheses interpolated.

mod kinds;
mod templates;
mod tool;

pub use kinds::{classify, AnalysisKind};
pub use templates::render;
pub use tool::GenerateTool;

use scholar_core::Result;
use scholar_protocol::ToolRegistry;
use std::sync::Arc;

/// Build the code generator's tool registry
pub fn registry() -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(GenerateTool))?;
    Ok(registry)
}
