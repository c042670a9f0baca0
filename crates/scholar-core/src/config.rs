//! Configuration management for Scholar
//!
//! Output roots, call/script deadlines, and launch commands for the
//! downstream tool servers. Loaded from `scholar.toml` when present.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::Result;

/// Suite-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarConfig {
    /// Where the data processor writes cleaned datasets and quality reports
    #[serde(default = "default_processed_dir")]
    pub processed_dir: PathBuf,

    /// Root for per-project script working directories
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Where the writer places research reports
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// Hard deadline for one downstream tool call, in seconds
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,

    /// Hard deadline for one executed analysis script, in seconds
    #[serde(default = "default_script_timeout_secs")]
    pub script_timeout_secs: u64,

    /// Launch command per downstream server, e.g.
    /// `initiator = ["scholar", "serve", "initiator"]`.
    /// Servers without an entry are launched through the current executable.
    #[serde(default)]
    pub servers: HashMap<String, Vec<String>>,
}

// Default value providers
fn default_processed_dir() -> PathBuf {
    PathBuf::from("processed_data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_call_timeout_secs() -> u64 {
    30
}

fn default_script_timeout_secs() -> u64 {
    60
}

impl ScholarConfig {
    /// Load configuration from `scholar.toml` in the given directory, or use defaults
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let config_path = dir.join("scholar.toml");

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(toml::from_str(&content).map_err(|e| {
                crate::ScholarError::Other(format!("Failed to parse config file: {}", e))
            })?)
        } else {
            Ok(Self::default())
        }
    }

    /// Path of the cleaned dataset the data processor emits for a project
    pub fn cleaned_data_path(&self, project_id: &str) -> PathBuf {
        self.processed_dir.join(format!("{}_cleaned.csv", project_id))
    }

    /// Path of the quality report emitted next to the cleaned dataset
    pub fn quality_report_path(&self, project_id: &str) -> PathBuf {
        self.processed_dir.join(format!("{}_quality.json", project_id))
    }

    /// Per-project script working directory
    pub fn project_workdir(&self, project_id: &str) -> PathBuf {
        self.output_dir.join(project_id)
    }

    /// Path of the markdown report the writer emits for a project
    pub fn report_path(&self, project_id: &str) -> PathBuf {
        self.reports_dir
            .join(format!("{}_research_report.md", project_id))
    }
}

impl Default for ScholarConfig {
    fn default() -> Self {
        Self {
            processed_dir: default_processed_dir(),
            output_dir: default_output_dir(),
            reports_dir: default_reports_dir(),
            call_timeout_secs: default_call_timeout_secs(),
            script_timeout_secs: default_script_timeout_secs(),
            servers: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScholarConfig::default();
        assert_eq!(config.call_timeout_secs, 30);
        assert_eq!(config.script_timeout_secs, 60);
        assert_eq!(config.processed_dir, PathBuf::from("processed_data"));
        assert!(config.servers.is_empty());
    }

    #[test]
    fn test_per_project_paths() {
        let config = ScholarConfig::default();
        assert_eq!(
            config.cleaned_data_path("proj_1_abc"),
            PathBuf::from("processed_data/proj_1_abc_cleaned.csv")
        );
        assert_eq!(
            config.project_workdir("proj_1_abc"),
            PathBuf::from("output/proj_1_abc")
        );
        assert_eq!(
            config.report_path("proj_1_abc"),
            PathBuf::from("reports/proj_1_abc_research_report.md")
        );
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScholarConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.call_timeout_secs, 30);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("scholar.toml"),
            "call_timeout_secs = 5\n\n[servers]\ninitiator = [\"scholar\", \"serve\", \"initiator\"]\n",
        )
        .unwrap();

        let config = ScholarConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.call_timeout_secs, 5);
        assert_eq!(config.script_timeout_secs, 60);
        assert_eq!(
            config.servers.get("initiator").unwrap(),
            &vec![
                "scholar".to_string(),
                "serve".to_string(),
                "initiator".to_string()
            ]
        );
    }
}
