//! Analysis-plan step classification
//!
//! Each free-text plan step maps to one script template by case-insensitive
//! substring matching. Match order is fixed; the first hit wins, and steps
//! matching nothing fall through to the custom template.

/// The script templates a plan step can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Eda,
    Correlation,
    Regression,
    TTest,
    Anova,
    ChiSquare,
    Custom,
}

/// Classify a plan step
pub fn classify(step: &str) -> AnalysisKind {
    let lower = step.to_lowercase();
    if lower.contains("descriptive") || lower.contains("eda") || lower.contains("exploratory") {
        AnalysisKind::Eda
    } else if lower.contains("correlation") {
        AnalysisKind::Correlation
    } else if lower.contains("regression") || lower.contains("linear model") {
        AnalysisKind::Regression
    } else if lower.contains("t-test") || lower.contains("ttest") {
        AnalysisKind::TTest
    } else if lower.contains("anova") {
        AnalysisKind::Anova
    } else if lower.contains("chi-square") || lower.contains("chi square") {
        AnalysisKind::ChiSquare
    } else {
        AnalysisKind::Custom
    }
}

impl AnalysisKind {
    /// Filename for the generated script. Numbered prefixes keep the
    /// execution order stable when scripts run alphabetically.
    pub fn script_name(&self, step: &str, project_id: &str) -> String {
        match self {
            Self::Eda => format!("01_eda_{}.py", project_id),
            Self::Correlation => format!("02_correlation_{}.py", project_id),
            Self::Regression => format!("03_regression_{}.py", project_id),
            Self::TTest => format!("04_ttest_{}.py", project_id),
            Self::Anova => format!("05_anova_{}.py", project_id),
            Self::ChiSquare => format!("06_chisquare_{}.py", project_id),
            Self::Custom => {
                let slug: String = step
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join("_");
                format!("custom_{}_{}.py", slug, project_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_eda_variants() {
        assert_eq!(classify("Descriptive statistics"), AnalysisKind::Eda);
        assert_eq!(classify("run EDA first"), AnalysisKind::Eda);
        assert_eq!(classify("Exploratory analysis"), AnalysisKind::Eda);
    }

    #[test]
    fn test_classify_match_order() {
        // "descriptive" wins over "correlation" because it is checked first
        assert_eq!(
            classify("descriptive correlation overview"),
            AnalysisKind::Eda
        );
        assert_eq!(classify("correlation analysis"), AnalysisKind::Correlation);
    }

    #[test]
    fn test_classify_statistical_tests() {
        assert_eq!(classify("Linear regression for H1"), AnalysisKind::Regression);
        assert_eq!(classify("fit a linear model"), AnalysisKind::Regression);
        assert_eq!(classify("independent t-test"), AnalysisKind::TTest);
        assert_eq!(classify("TTest by group"), AnalysisKind::TTest);
        assert_eq!(classify("one-way ANOVA"), AnalysisKind::Anova);
        assert_eq!(classify("chi-square test"), AnalysisKind::ChiSquare);
        assert_eq!(classify("Chi Square association"), AnalysisKind::ChiSquare);
    }

    #[test]
    fn test_classify_fallback() {
        assert_eq!(classify("survival analysis"), AnalysisKind::Custom);
    }

    #[test]
    fn test_script_names() {
        assert_eq!(
            AnalysisKind::Eda.script_name("eda", "proj_1_abc"),
            "01_eda_proj_1_abc.py"
        );
        assert_eq!(
            AnalysisKind::ChiSquare.script_name("chi-square", "proj_1_abc"),
            "06_chisquare_proj_1_abc.py"
        );
        assert_eq!(
            AnalysisKind::Custom.script_name("survival analysis", "proj_1_abc"),
            "custom_survival_analysis_proj_1_abc.py"
        );
    }
}
