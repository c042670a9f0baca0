//! Project state
//!
//! One record per research project, held in memory for the life of the
//! orchestrator process. The workflow stage only ever moves forward; a
//! failed downstream step leaves it where it was.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Pipeline progress marker, ordered by how far the project has advanced
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    #[default]
    Initiated,
    ResearchDesignComplete,
    DataProcessingComplete,
    CodeGenerationComplete,
}

impl std::fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initiated => write!(f, "initiated"),
            Self::ResearchDesignComplete => write!(f, "research_design_complete"),
            Self::DataProcessingComplete => write!(f, "data_processing_complete"),
            Self::CodeGenerationComplete => write!(f, "code_generation_complete"),
        }
    }
}

impl WorkflowStage {
    /// Recommended follow-up actions for a project left at this stage
    pub fn next_steps(&self) -> Vec<String> {
        let steps: &[&str] = match self {
            Self::CodeGenerationComplete => {
                &["Execute analysis scripts", "Generate research report"]
            }
            Self::DataProcessingComplete => &["Generate analysis code"],
            Self::ResearchDesignComplete => &["Process raw data", "Generate analysis code"],
            Self::Initiated => &["Complete research design"],
        };
        steps.iter().map(|s| s.to_string()).collect()
    }
}

/// Everything the orchestrator knows about one project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectState {
    pub project_id: String,
    pub project_title: String,
    pub user_prompt: String,
    pub references: Vec<String>,
    pub raw_data_path: String,

    // Populated as pipeline steps succeed
    pub refined_question: Option<String>,
    pub hypotheses: Option<Vec<String>>,
    pub operational_definitions: Option<Value>,
    pub lit_review_notes: Option<String>,
    pub cleaned_data_path: Option<String>,
    pub processing_log: Option<Vec<String>>,
    pub decision_rationale: Option<String>,
    pub analysis_scripts: Option<Value>,
    pub exploratory_findings: Option<Value>,

    pub workflow_stage: WorkflowStage,
    pub errors: Vec<String>,
    pub log: Vec<String>,
}

impl ProjectState {
    pub fn new(
        project_id: String,
        project_title: String,
        user_prompt: String,
        references: Vec<String>,
        raw_data_path: String,
    ) -> Self {
        Self {
            log: vec![format!(
                "Project {} initiated at {}",
                project_id,
                Utc::now().to_rfc3339()
            )],
            project_id,
            project_title,
            user_prompt,
            references,
            raw_data_path,
            refined_question: None,
            hypotheses: None,
            operational_definitions: None,
            lit_review_notes: None,
            cleaned_data_path: None,
            processing_log: None,
            decision_rationale: None,
            analysis_scripts: None,
            exploratory_findings: None,
            workflow_stage: WorkflowStage::Initiated,
            errors: Vec::new(),
        }
    }

    /// Move the stage forward; a stage already passed is never rolled back
    pub fn advance(&mut self, stage: WorkflowStage) {
        if stage > self.workflow_stage {
            self.workflow_stage = stage;
        }
    }
}

/// In-memory project store. Projects are created on initiate and kept for
/// the life of the process; there is no eviction.
#[derive(Debug, Default)]
pub struct ProjectStore {
    projects: HashMap<String, ProjectState>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, project: ProjectState) {
        self.projects.insert(project.project_id.clone(), project);
    }

    pub fn get(&self, project_id: &str) -> Option<&ProjectState> {
        self.projects.get(project_id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectState {
        ProjectState::new(
            "proj_1_abc".to_string(),
            "Remote work study".to_string(),
            "Does remote work affect productivity?".to_string(),
            vec!["smith2023.pdf".to_string()],
            "data/raw.csv".to_string(),
        )
    }

    #[test]
    fn test_stage_ordering() {
        assert!(WorkflowStage::Initiated < WorkflowStage::ResearchDesignComplete);
        assert!(WorkflowStage::ResearchDesignComplete < WorkflowStage::DataProcessingComplete);
        assert!(WorkflowStage::DataProcessingComplete < WorkflowStage::CodeGenerationComplete);
    }

    #[test]
    fn test_stage_serialization() {
        assert_eq!(
            serde_json::to_value(WorkflowStage::ResearchDesignComplete).unwrap(),
            "research_design_complete"
        );
        assert_eq!(
            WorkflowStage::DataProcessingComplete.to_string(),
            "data_processing_complete"
        );
    }

    #[test]
    fn test_next_steps_table() {
        assert_eq!(
            WorkflowStage::CodeGenerationComplete.next_steps(),
            vec!["Execute analysis scripts", "Generate research report"]
        );
        assert_eq!(
            WorkflowStage::DataProcessingComplete.next_steps(),
            vec!["Generate analysis code"]
        );
        assert_eq!(
            WorkflowStage::ResearchDesignComplete.next_steps(),
            vec!["Process raw data", "Generate analysis code"]
        );
        assert_eq!(
            WorkflowStage::Initiated.next_steps(),
            vec!["Complete research design"]
        );
    }

    #[test]
    fn test_advance_is_monotonic() {
        let mut project = project();
        project.advance(WorkflowStage::DataProcessingComplete);
        assert_eq!(project.workflow_stage, WorkflowStage::DataProcessingComplete);

        // advancing to an earlier stage is a no-op
        project.advance(WorkflowStage::ResearchDesignComplete);
        assert_eq!(project.workflow_stage, WorkflowStage::DataProcessingComplete);

        project.advance(WorkflowStage::CodeGenerationComplete);
        assert_eq!(project.workflow_stage, WorkflowStage::CodeGenerationComplete);
    }

    #[test]
    fn test_new_project_logs_initiation() {
        let project = project();
        assert_eq!(project.workflow_stage, WorkflowStage::Initiated);
        assert_eq!(project.log.len(), 1);
        assert!(project.log[0].starts_with("Project proj_1_abc initiated at "));
    }

    #[test]
    fn test_store_keeps_projects() {
        let mut store = ProjectStore::new();
        assert!(store.is_empty());
        store.insert(project());
        assert_eq!(store.len(), 1);
        assert!(store.get("proj_1_abc").is_some());
        assert!(store.get("proj_2_def").is_none());
    }
}
