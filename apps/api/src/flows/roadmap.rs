//! Roadmap generation: monthly career roadmaps and quarterly college-prep roadmaps.
//!
//! Flow: build prompt → model returns milestones → if the learner is auditory,
//! exactly one narration call over the returned milestones.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::flows::narration::{self, Narration};
use crate::flows::prompts::{
    interpolate, CAREER_NARRATION_TEMPLATE, ROADMAP_PROMPT_TEMPLATE, SCHOOL_NARRATION_TEMPLATE,
    SCHOOL_ROADMAP_PROMPT_TEMPLATE,
};
use crate::flows::{run_flow, schema, OutputShape};
use crate::llm_client::prompts::{
    CAREER_LEARNING_STYLE_RULES, MARKET_INSTRUCTION, SCHOOL_LEARNING_STYLE_RULES,
};
use crate::llm_client::{GenerativeModel, LlmError};
use crate::models::profile::LearningStyle;

/// One period of a roadmap, whatever its unit.
pub trait Period {
    /// "Month" or "Quarter".
    const UNIT: &'static str;
    /// Compact prefix used on chart axes: "Month " or "Q".
    const SHORT_PREFIX: &'static str;

    fn index(&self) -> u32;
    fn title(&self) -> &str;
    fn tasks(&self) -> &[String];

    fn label(&self) -> String {
        format!("{} {}", Self::UNIT, self.index())
    }

    fn short_label(&self) -> String {
        format!("{}{}", Self::SHORT_PREFIX, self.index())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub month: u32,
    pub title: String,
    pub tasks: Vec<String>,
}

impl Period for Milestone {
    const UNIT: &'static str = "Month";
    const SHORT_PREFIX: &'static str = "Month ";

    fn index(&self) -> u32 {
        self.month
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn tasks(&self) -> &[String] {
        &self.tasks
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterMilestone {
    pub quarter: u32,
    pub title: String,
    pub tasks: Vec<String>,
}

impl Period for QuarterMilestone {
    const UNIT: &'static str = "Quarter";
    const SHORT_PREFIX: &'static str = "Q";

    fn index(&self) -> u32 {
        self.quarter
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn tasks(&self) -> &[String] {
        &self.tasks
    }
}

/// What the model returns; narration is attached afterwards.
#[derive(Debug, Deserialize)]
struct MilestoneList<M> {
    milestones: Vec<M>,
}

fn milestone_schema(unit_field: &str, unit_description: &str) -> Value {
    schema::object(vec![
        (unit_field, schema::integer(unit_description)),
        ("title", schema::string("A short, descriptive title for the milestone.")),
        (
            "tasks",
            schema::string_list("Specific tasks, actions, or resources for this milestone."),
        ),
    ])
}

impl OutputShape for MilestoneList<Milestone> {
    fn schema() -> Value {
        schema::object(vec![(
            "milestones",
            schema::array(
                milestone_schema("month", "The month number for this milestone (e.g., 1)."),
                "Milestones ordered chronologically for a 6-12 month roadmap.",
            ),
        )])
    }
}

impl OutputShape for MilestoneList<QuarterMilestone> {
    fn schema() -> Value {
        schema::object(vec![(
            "milestones",
            schema::array(
                milestone_schema("quarter", "The quarter number for this milestone (e.g., 1)."),
                "Quarterly milestones for college entrance preparation.",
            ),
        )])
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Career roadmap
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapRequest {
    pub student_profile: String,
    pub career_path: String,
    pub current_skills: String,
    pub skill_gaps: String,
    pub learning_style: LearningStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub milestones: Vec<Milestone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration: Option<Narration>,
}

pub fn build_prompt(request: &RoadmapRequest) -> String {
    interpolate(
        ROADMAP_PROMPT_TEMPLATE,
        &[
            ("market_instruction", MARKET_INSTRUCTION),
            ("learning_style_rules", CAREER_LEARNING_STYLE_RULES),
            ("student_profile", request.student_profile.as_str()),
            ("career_path", request.career_path.as_str()),
            ("current_skills", request.current_skills.as_str()),
            ("skill_gaps", request.skill_gaps.as_str()),
            ("learning_style", request.learning_style.as_str()),
        ],
    )
}

pub async fn generate_roadmap(
    model: &dyn GenerativeModel,
    request: &RoadmapRequest,
) -> Result<Roadmap, LlmError> {
    let list: MilestoneList<Milestone> =
        run_flow(model, "roadmap", &build_prompt(request)).await?;
    info!(
        "Roadmap for '{}' has {} milestones",
        request.career_path,
        list.milestones.len()
    );

    let narration = if request.learning_style.is_auditory() {
        let script = narration::script(CAREER_NARRATION_TEMPLATE, &list.milestones);
        Some(narration::narrate(model, script).await?)
    } else {
        None
    };

    Ok(Roadmap {
        milestones: list.milestones,
        narration,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// School roadmap
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolRoadmapRequest {
    pub student_profile: String,
    pub learning_style: LearningStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRoadmap {
    pub milestones: Vec<QuarterMilestone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration: Option<Narration>,
}

pub fn build_school_prompt(request: &SchoolRoadmapRequest) -> String {
    interpolate(
        SCHOOL_ROADMAP_PROMPT_TEMPLATE,
        &[
            ("learning_style_rules", SCHOOL_LEARNING_STYLE_RULES),
            ("student_profile", request.student_profile.as_str()),
            ("learning_style", request.learning_style.as_str()),
        ],
    )
}

pub async fn generate_school_roadmap(
    model: &dyn GenerativeModel,
    request: &SchoolRoadmapRequest,
) -> Result<SchoolRoadmap, LlmError> {
    let list: MilestoneList<QuarterMilestone> =
        run_flow(model, "school_roadmap", &build_school_prompt(request)).await?;

    let narration = if request.learning_style.is_auditory() {
        let script = narration::script(SCHOOL_NARRATION_TEMPLATE, &list.milestones);
        Some(narration::narrate(model, script).await?)
    } else {
        None
    };

    Ok(SchoolRoadmap {
        milestones: list.milestones,
        narration,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::llm_client::testing::ScriptedModel;

    fn request(style: LearningStyle) -> RoadmapRequest {
        RoadmapRequest {
            student_profile: "Academic Background: BCA".to_string(),
            career_path: "Cloud Engineer".to_string(),
            current_skills: "Linux, Python".to_string(),
            skill_gaps: "Technical: AWS. Soft Skills: None.".to_string(),
            learning_style: style,
        }
    }

    fn milestones_json() -> Value {
        json!({
            "milestones": [
                {"month": 1, "title": "Cloud basics", "tasks": ["AWS Cloud Practitioner", "Linux refresher"]},
                {"month": 2, "title": "Infrastructure as code", "tasks": ["Terraform course"]}
            ]
        })
    }

    #[test]
    fn test_prompt_carries_gaps_and_style() {
        let prompt = build_prompt(&request(LearningStyle::Kinesthetic));
        assert!(prompt.contains("Skill Gaps: Technical: AWS. Soft Skills: None."));
        assert!(prompt.contains("Learning Style: Kinesthetic"));
        assert!(prompt.contains("For Kinesthetic learners"));
    }

    #[test]
    fn test_profile_text_is_not_rewritten_by_later_fields() {
        let mut req = request(LearningStyle::Visual);
        req.student_profile = "Goals: automate {skill_gaps} and {career_path}".to_string();
        let prompt = build_prompt(&req);
        assert!(prompt.contains("Student Profile: Goals: automate {skill_gaps} and {career_path}"));
        assert!(prompt.contains("Career Path: Cloud Engineer"));
        assert_eq!(prompt.matches("Technical: AWS.").count(), 1);
    }

    #[test]
    fn test_period_labels() {
        let m = Milestone {
            month: 3,
            title: "x".to_string(),
            tasks: vec![],
        };
        let q = QuarterMilestone {
            quarter: 2,
            title: "y".to_string(),
            tasks: vec![],
        };
        assert_eq!(m.label(), "Month 3");
        assert_eq!(m.short_label(), "Month 3");
        assert_eq!(q.label(), "Quarter 2");
        assert_eq!(q.short_label(), "Q2");
    }

    #[tokio::test]
    async fn test_non_auditory_styles_make_no_narration_call() {
        for style in [
            LearningStyle::Visual,
            LearningStyle::ReadingWriting,
            LearningStyle::Kinesthetic,
        ] {
            let model = ScriptedModel::new().push_json(milestones_json());
            let roadmap = generate_roadmap(&model, &request(style)).await.unwrap();
            assert!(roadmap.narration.is_none());
            assert_eq!(model.json_calls().len(), 1);
            assert!(model.speech_calls().is_empty());
        }
    }

    #[tokio::test]
    async fn test_auditory_style_makes_exactly_one_narration_call() {
        let model = ScriptedModel::new()
            .push_json(milestones_json())
            .push_speech(Some(vec![0, 0, 1, 0]));
        let roadmap = generate_roadmap(&model, &request(LearningStyle::Auditory))
            .await
            .unwrap();

        let speech = model.speech_calls();
        assert_eq!(speech.len(), 1);
        assert!(speech[0].contains("- Month 1: Cloud basics - AWS Cloud Practitioner, Linux refresher"));
        assert!(speech[0].contains("- Month 2: Infrastructure as code - Terraform course"));

        let narration = roadmap.narration.unwrap();
        assert_eq!(narration.script, speech[0]);
        assert!(narration
            .audio
            .unwrap()
            .starts_with("data:audio/wav;base64,"));
    }

    #[tokio::test]
    async fn test_failed_roadmap_call_skips_narration() {
        let model = ScriptedModel::new().push_json_failure("deadline exceeded");
        let result = generate_roadmap(&model, &request(LearningStyle::Auditory)).await;
        assert!(result.is_err());
        assert!(model.speech_calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_audio_keeps_script() {
        let model = ScriptedModel::new()
            .push_json(milestones_json())
            .push_speech(None);
        let roadmap = generate_roadmap(&model, &request(LearningStyle::Auditory))
            .await
            .unwrap();
        let narration = roadmap.narration.unwrap();
        assert!(narration.audio.is_none());
        assert!(!narration.script.is_empty());
    }

    #[tokio::test]
    async fn test_failed_narration_fails_roadmap() {
        let model = ScriptedModel::new()
            .push_json(milestones_json())
            .push_speech_failure("tts unavailable");
        let result = generate_roadmap(&model, &request(LearningStyle::Auditory)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_milestone_order_is_preserved() {
        let model = ScriptedModel::new().push_json(json!({
            "milestones": [
                {"month": 2, "title": "b", "tasks": []},
                {"month": 1, "title": "a", "tasks": []}
            ]
        }));
        let roadmap = generate_roadmap(&model, &request(LearningStyle::Visual))
            .await
            .unwrap();
        let months: Vec<u32> = roadmap.milestones.iter().map(|m| m.month).collect();
        assert_eq!(months, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_school_roadmap_uses_quarters() {
        let model = ScriptedModel::new()
            .push_json(json!({
                "milestones": [
                    {"quarter": 1, "title": "Foundation Building", "tasks": ["NCERT Physics"]}
                ]
            }))
            .push_speech(Some(vec![0, 0]));
        let request = SchoolRoadmapRequest {
            student_profile: "Academic Background: Class 11".to_string(),
            learning_style: LearningStyle::Auditory,
        };
        let roadmap = generate_school_roadmap(&model, &request).await.unwrap();
        assert_eq!(roadmap.milestones[0].quarter, 1);
        assert!(model.speech_calls()[0].contains("- Quarter 1: Foundation Building - NCERT Physics"));
        assert!(model.json_calls()[0].contains("quarterly milestones"));
    }

    #[test]
    fn test_roadmap_serializes_without_absent_narration() {
        let roadmap = Roadmap {
            milestones: vec![],
            narration: None,
        };
        let value = serde_json::to_value(&roadmap).unwrap();
        assert!(value.get("narration").is_none());
    }
}
