//! Research design derivation
//!
//! Deterministic string transforms of the incoming prompt and reference
//! list. No external lookups: the same prompt always yields the same design.

use serde::Serialize;
use serde_json::{Map, Value};

/// The four payload fields the `refine` operation produces
#[derive(Debug, Clone, Serialize)]
pub struct ResearchDesign {
    pub refined_question: String,
    pub hypotheses: Vec<String>,
    pub operational_definitions: Map<String, Value>,
    pub lit_review_notes: String,
}

/// Derive a research design from a prompt and its references
pub fn develop_design(prompt: &str, references: &[String]) -> ResearchDesign {
    let refs = references.join(", ");

    let refined_question = format!("Refined version of: {} based on {}.", prompt, refs);

    let hypotheses = vec![format!(
        "H1: {} is positively correlated with outcome X.",
        prompt
    )];

    let mut operational_definitions = Map::new();
    operational_definitions.insert(
        concept_key(prompt),
        Value::String("Measured by survey score Y.".to_string()),
    );
    operational_definitions.insert(
        "outcome_X".to_string(),
        Value::String("Measured by metric Z.".to_string()),
    );

    let lit_review_notes = format!(
        "Initial literature review suggests strong support for exploring '{}'. Key papers include {}.",
        prompt, refs
    );

    ResearchDesign {
        refined_question,
        hypotheses,
        operational_definitions,
        lit_review_notes,
    }
}

/// Key for the prompt's primary concept: first ten characters, spaces
/// replaced with underscores
fn concept_key(prompt: &str) -> String {
    prompt
        .chars()
        .take(10)
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
