//! Career exploration: career paths paired with the skills the student lacks for each.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::flows::prompts::{interpolate, EXPLORATION_PROMPT_TEMPLATE};
use crate::flows::{run_flow, schema, OutputShape};
use crate::llm_client::prompts::MARKET_INSTRUCTION;
use crate::llm_client::{GenerativeModel, LlmError};
use crate::models::forms::ExplorerForm;

const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorationRequest {
    pub interests: String,
    pub skills: String,
    pub goals: String,
    pub academic_background: String,
}

impl From<ExplorerForm> for ExplorationRequest {
    fn from(form: ExplorerForm) -> Self {
        let or_unspecified = |value: Option<String>| {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string())
        };
        Self {
            interests: form.interests,
            skills: form.skills,
            goals: or_unspecified(form.goals),
            academic_background: or_unspecified(form.academic_background),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploredCareer {
    pub career_path: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerExploration {
    pub recommendations: Vec<ExploredCareer>,
}

impl OutputShape for CareerExploration {
    fn schema() -> Value {
        schema::object(vec![(
            "recommendations",
            schema::array(
                schema::object(vec![
                    ("careerPath", schema::string("The career path.")),
                    (
                        "skills",
                        schema::string_list(
                            "Missing technical and soft skills for this career path based on the student's current skill set.",
                        ),
                    ),
                ]),
                "A list of 3-5 career recommendations.",
            ),
        )])
    }
}

pub fn build_prompt(request: &ExplorationRequest) -> String {
    interpolate(
        EXPLORATION_PROMPT_TEMPLATE,
        &[
            ("market_instruction", MARKET_INSTRUCTION),
            ("interests", request.interests.as_str()),
            ("skills", request.skills.as_str()),
            ("goals", request.goals.as_str()),
            ("academic_background", request.academic_background.as_str()),
        ],
    )
}

pub async fn explore_career_paths(
    model: &dyn GenerativeModel,
    request: &ExplorationRequest,
) -> Result<CareerExploration, LlmError> {
    run_flow(model, "career_exploration", &build_prompt(request)).await
}
