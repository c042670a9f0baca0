//! Core type definitions shared by every Scholar tool server

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{Result, ScholarError};

/// Outcome discriminator carried by every tool payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Success,
    PartialSuccess,
    Error,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::PartialSuccess => write!(f, "partial_success"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "partial_success" => Ok(Self::PartialSuccess),
            "error" => Ok(Self::Error),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

impl Status {
    /// Success when no errors were recorded, partial success otherwise
    pub fn from_errors(errors: &[String]) -> Self {
        if errors.is_empty() {
            Self::Success
        } else {
            Self::PartialSuccess
        }
    }
}

/// One block inside a tool result envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// Tool invocation envelope: `{content: [{type, text}], isError?}`
///
/// The payload inside `content` is itself a JSON object carrying at minimum
/// `{status, errors, log}` plus operation-specific fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolResult {
    /// Wrap a payload object into the envelope
    pub fn from_payload(payload: &Value, is_error: bool) -> Result<Self> {
        let text = serde_json::to_string_pretty(payload)?;
        Ok(Self {
            content: vec![ToolContent {
                kind: "text".to_string(),
                text,
            }],
            is_error: if is_error { Some(true) } else { None },
        })
    }

    /// Parse the payload object back out of the envelope
    pub fn payload(&self) -> Result<Value> {
        let first = self
            .content
            .first()
            .ok_or_else(|| ScholarError::Protocol("empty tool result content".to_string()))?;
        Ok(serde_json::from_str(&first.text)?)
    }
}

/// Generate a unique project identifier: `proj_<timestamp>_<random>`
pub fn generate_project_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("proj_{}_{}", Utc::now().timestamp_millis(), &suffix[..9])
}
