//! # scholar-wrangler
//!
//! The data processing server. Exposes one tool, `process`, which reads a
//! raw CSV dataset, analyzes its quality (missing values, inferred column
//! types, IQR outliers), removes duplicate and incomplete rows, and writes
//! the cleaned dataset plus a quality report for the rest of the pipeline.

mod clean;
mod quality;
mod table;
mod tool;

pub use clean::{clean, CleanOutcome};
pub use quality::{ColumnQuality, ColumnType, QualityReport};
pub use table::Table;
pub use tool::ProcessTool;

use scholar_core::{Result, ScholarConfig};
use scholar_protocol::ToolRegistry;
use std::sync::Arc;

/// Build the data processor's tool registry
pub fn registry(config: ScholarConfig) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(ProcessTool::new(config)))?;
    Ok(registry)
}
