//! # scholar-core
//!
//! Core types for the Scholar academic research tool-server suite.
//!
//! Scholar is a set of independent tool servers speaking a line-oriented
//! JSON-RPC protocol over stdin/stdout. Each server exposes a small number of
//! named operations with schema-validated inputs; the orchestrator server
//! coordinates the research pipeline by invoking the others as external
//! processes.
//!
//! This crate holds what every server shares:
//!
//! - The unified error taxonomy ([`ScholarError`])
//! - The tool result envelope and status discriminator
//! - Suite-wide configuration ([`ScholarConfig`])

mod config;
mod error;
mod types;

pub use config::ScholarConfig;
pub use error::{Result, ScholarError};
pub use types::{generate_project_id, Status, ToolContent, ToolResult};
