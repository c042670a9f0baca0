//! Report section builders
//!
//! Each function renders one markdown section. Optional inputs fall back to
//! fixed boilerplate so the report always has every section.

/// Truncation point for the findings excerpt in the executive summary
const FINDINGS_EXCERPT_CHARS: usize = 500;

pub fn executive_summary(question: &str, hypotheses: &[String], results: &str) -> String {
    let excerpt: String = results.chars().take(FINDINGS_EXCERPT_CHARS).collect();
    let ellipsis = if results.chars().count() > FINDINGS_EXCERPT_CHARS {
        "..."
    } else {
        ""
    };

    format!(
        "## Executive Summary\n\n\
         This research study investigated: \"{}\"\n\n\
         **Key Hypotheses Tested:**\n{}\n\n\
         **Main Findings:**\n{}{}\n\n\
         The study provides valuable insights into the research question and offers \
         evidence-based conclusions for further consideration.",
        question,
        numbered(hypotheses),
        excerpt,
        ellipsis,
    )
}

pub fn literature_review(notes: Option<&str>) -> String {
    let body = notes.unwrap_or(
        "The existing literature provides important context for this research. Previous \
         studies have explored related questions and established theoretical frameworks that \
         inform our approach. This study builds upon established research while contributing \
         new insights to the field.",
    );

    format!(
        "## Literature Review\n\n{}\n\n\
         ### Theoretical Framework\n\
         The research is grounded in established theoretical perspectives that guide the \
         interpretation of findings and their implications for practice and future research.",
        body,
    )
}

pub fn methodology(methodology: Option<&str>, data_description: Option<&str>) -> String {
    let approach = methodology.unwrap_or(
        "This study employed a quantitative research approach with statistical analysis of \
         the collected data. The methodology was designed to test the stated hypotheses \
         through appropriate analytical techniques.",
    );
    let data = data_description.unwrap_or(
        "The dataset used in this analysis was processed and cleaned according to research \
         best practices. Data quality checks were performed to ensure reliability of the \
         results.",
    );

    format!(
        "## Methodology\n\n{}\n\n\
         ### Data Description\n{}\n\n\
         ### Analytical Approach\n\
         Statistical analyses were conducted to test each hypothesis, including descriptive \
         statistics, correlation analysis, and appropriate inferential tests based on the \
         data characteristics and research questions.",
        approach, data,
    )
}

pub fn results_section(results: &str, hypotheses: &[String]) -> String {
    let testing_summary = hypotheses
        .iter()
        .enumerate()
        .map(|(i, h)| {
            format!(
                "\n**Hypothesis {}:** {}\n\
                 - Analysis conducted using appropriate statistical methods\n\
                 - Results interpreted in context of research question\n\
                 - Implications discussed below\n",
                i + 1,
                h,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "## Results and Findings\n\n\
         ### Statistical Analysis Results\n{}\n\n\
         ### Hypothesis Testing Summary\n{}\n\n\
         ### Key Insights\n\
         The analysis reveals important patterns and relationships in the data that \
         contribute to our understanding of the research question. Detailed statistical \
         outputs and visualizations support these findings.",
        results, testing_summary,
    )
}

pub fn discussion(question: &str) -> String {
    format!(
        "## Discussion and Conclusions\n\n\
         ### Interpretation of Findings\n\
         The results of this study provide important insights into the research question: \
         \"{}\"\n\n\
         The statistical analysis reveals patterns that contribute to our understanding of \
         the underlying phenomena. These findings have both theoretical and practical \
         implications.\n\n\
         ### Limitations\n\
         As with all research, this study has certain limitations that should be considered \
         when interpreting the results:\n\
         - Sample characteristics and generalizability\n\
         - Methodological constraints\n\
         - Data collection limitations\n\n\
         ### Implications for Practice\n\
         The findings suggest several practical applications and recommendations for \
         stakeholders in the field.\n\n\
         ### Future Research Directions\n\
         This study opens several avenues for future investigation:\n\
         - Replication with different populations\n\
         - Longitudinal studies to examine changes over time\n\
         - Exploration of additional variables and relationships\n\n\
         ### Conclusion\n\
         This research contributes valuable evidence to the field and provides a foundation \
         for continued investigation of these important questions.",
        question,
    )
}

pub fn references() -> String {
    "## References\n\n\
     *Note: In a complete research report, this section would include full citations of all \
     sources referenced in the literature review and methodology sections. References should \
     follow appropriate academic citation style (APA, MLA, etc.).*\n\n\
     1. [Literature sources would be listed here]\n\
     2. [Methodology references would be included]\n\
     3. [Statistical analysis references as appropriate]"
        .to_string()
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hypotheses() -> Vec<String> {
        vec!["H1: A affects B".to_string(), "H2: C moderates A".to_string()]
    }

    #[test]
    fn test_executive_summary_numbers_hypotheses() {
        let section = executive_summary("Does A affect B?", &hypotheses(), "strong effect");
        assert!(section.contains("This research study investigated: \"Does A affect B?\""));
        assert!(section.contains("1. H1: A affects B"));
        assert!(section.contains("2. H2: C moderates A"));
        assert!(section.contains("strong effect\n"));
    }

    #[test]
    fn test_executive_summary_truncates_long_results() {
        let results = "x".repeat(600);
        let section = executive_summary("Q", &hypotheses(), &results);
        assert!(section.contains(&format!("{}...", "x".repeat(500))));
        assert!(!section.contains(&"x".repeat(501)));
    }

    #[test]
    fn test_optional_sections_fall_back_to_boilerplate() {
        let lit = literature_review(None);
        assert!(lit.contains("The existing literature provides important context"));

        let lit = literature_review(Some("Smith (2023) found..."));
        assert!(lit.contains("Smith (2023) found..."));
        assert!(lit.contains("### Theoretical Framework"));

        let method = methodology(None, Some("Survey of 500 workers"));
        assert!(method.contains("quantitative research approach"));
        assert!(method.contains("Survey of 500 workers"));
    }

    #[test]
    fn test_results_section_per_hypothesis_block() {
        let section = results_section("r = 0.4", &hypotheses());
        assert!(section.contains("**Hypothesis 1:** H1: A affects B"));
        assert!(section.contains("**Hypothesis 2:** H2: C moderates A"));
        assert!(section.contains("### Statistical Analysis Results\nr = 0.4"));
    }

    #[test]
    fn test_discussion_quotes_question() {
        let section = discussion("Does A affect B?");
        assert!(section.contains("research question: \"Does A affect B?\""));
        assert!(section.contains("### Future Research Directions"));
    }
}
