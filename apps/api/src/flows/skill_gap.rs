//! Skill-gap analysis: technical and soft skills a career needs that the student lacks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::flows::prompts::{interpolate, SKILL_GAP_PROMPT_TEMPLATE};
use crate::flows::{run_flow, schema, OutputShape};
use crate::llm_client::{GenerativeModel, LlmError};

const NONE_TOKEN: &str = "None";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapAnalysis {
    pub missing_technical_skills: Vec<String>,
    pub missing_soft_skills: Vec<String>,
}

impl SkillGapAnalysis {
    /// Text form passed to the roadmap flow. An empty list is written as `None`.
    pub fn summary(&self) -> String {
        format!(
            "Technical: {}. Soft Skills: {}.",
            join_or_none(&self.missing_technical_skills),
            join_or_none(&self.missing_soft_skills)
        )
    }
}

fn join_or_none(skills: &[String]) -> String {
    if skills.is_empty() {
        NONE_TOKEN.to_string()
    } else {
        skills.join(", ")
    }
}

impl OutputShape for SkillGapAnalysis {
    fn schema() -> Value {
        schema::object(vec![
            (
                "missingTechnicalSkills",
                schema::string_list("The missing technical skills for the career path."),
            ),
            (
                "missingSoftSkills",
                schema::string_list("The missing soft skills for the career path."),
            ),
        ])
    }
}

pub fn build_prompt(career_path: &str, student_skills: &[String]) -> String {
    interpolate(
        SKILL_GAP_PROMPT_TEMPLATE,
        &[
            ("career_path", career_path),
            ("student_skills", join_or_none(student_skills).as_str()),
        ],
    )
}

pub async fn analyze_skill_gaps(
    model: &dyn GenerativeModel,
    career_path: &str,
    student_skills: &[String],
) -> Result<SkillGapAnalysis, LlmError> {
    run_flow(
        model,
        "skill_gap_analysis",
        &build_prompt(career_path, student_skills),
    )
    .await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::llm_client::testing::ScriptedModel;

    fn gaps(technical: &[&str], soft: &[&str]) -> SkillGapAnalysis {
        SkillGapAnalysis {
            missing_technical_skills: technical.iter().map(|s| s.to_string()).collect(),
            missing_soft_skills: soft.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_summary_lists_both_kinds() {
        assert_eq!(
            gaps(&["Docker", "Kubernetes"], &["Negotiation"]).summary(),
            "Technical: Docker, Kubernetes. Soft Skills: Negotiation."
        );
    }

    #[test]
    fn test_summary_substitutes_none_for_empty_technical() {
        let summary = gaps(&[], &["Public speaking"]).summary();
        assert!(summary.contains("Technical: None."));
        assert!(summary.contains("Soft Skills: Public speaking."));
    }

    #[test]
    fn test_summary_substitutes_none_for_both_empty() {
        assert_eq!(gaps(&[], &[]).summary(), "Technical: None. Soft Skills: None.");
    }

    #[test]
    fn test_prompt_joins_student_skills() {
        let prompt = build_prompt(
            "Data Engineer",
            &["Python".to_string(), "SQL".to_string()],
        );
        assert!(prompt.contains("Career Path: Data Engineer"));
        assert!(prompt.contains("Student Skills: Python, SQL"));
    }

    #[test]
    fn test_prompt_writes_none_for_empty_skill_list() {
        let prompt = build_prompt("Data Engineer", &[]);
        assert!(prompt.contains("Student Skills: None"));
    }

    #[test]
    fn test_prompt_keeps_braces_in_career_name() {
        let prompt = build_prompt("{student_skills} Engineer", &["Rust".to_string()]);
        assert!(prompt.contains("Career Path: {student_skills} Engineer"));
        assert!(prompt.contains("Student Skills: Rust"));
    }

    #[tokio::test]
    async fn test_analyze_parses_both_lists() {
        let model = ScriptedModel::new().push_json(json!({
            "missingTechnicalSkills": ["Spark"],
            "missingSoftSkills": []
        }));
        let result = analyze_skill_gaps(&model, "Data Engineer", &["SQL".to_string()])
            .await
            .unwrap();
        assert_eq!(result, gaps(&["Spark"], &[]));
    }
}
