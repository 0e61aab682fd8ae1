//! Career recommendation: turns a student profile into 3-5 career options.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::flows::prompts::{interpolate, RECOMMENDATION_PROMPT_TEMPLATE};
use crate::flows::{run_flow, schema, OutputShape};
use crate::llm_client::prompts::MARKET_INSTRUCTION;
use crate::llm_client::{GenerativeModel, LlmError};
use crate::models::profile::StudentProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecommendation {
    pub career_options: Vec<String>,
}

impl OutputShape for CareerRecommendation {
    fn schema() -> Value {
        schema::object(vec![(
            "careerOptions",
            schema::string_list("A list of 3-5 career options tailored to the student's profile."),
        )])
    }
}

pub fn build_prompt(profile: &StudentProfile) -> String {
    interpolate(
        RECOMMENDATION_PROMPT_TEMPLATE,
        &[
            ("market_instruction", MARKET_INSTRUCTION),
            ("academic_background", profile.academic_background.as_str()),
            ("interests", profile.interests.as_str()),
            ("skills", profile.skills.as_str()),
            ("goals", profile.goals.as_str()),
            ("learning_style", profile.learning_style.as_str()),
        ],
    )
}

pub async fn recommend_career_paths(
    model: &dyn GenerativeModel,
    profile: &StudentProfile,
) -> Result<CareerRecommendation, LlmError> {
    run_flow(model, "career_recommendation", &build_prompt(profile)).await
}
