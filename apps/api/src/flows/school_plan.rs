//! School plan: the college-prep roadmap and college alternatives, fetched
//! concurrently. Each slice succeeds or fails on its own.

use serde::Serialize;
use tracing::{error, info};

use crate::errors::Notice;
use crate::flows::roadmap::{generate_school_roadmap, SchoolRoadmap, SchoolRoadmapRequest};
use crate::flows::suggestions::{suggest_college_alternatives, CollegeAlternatives};
use crate::llm_client::{GenerativeModel, LlmError};
use crate::models::forms::SchoolForm;

/// One independently-resolved part of a fan-out response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Slice<T> {
    Ready { value: T },
    Failed { notice: Notice },
}

impl<T> Slice<T> {
    fn from_result(what: &str, result: Result<T, LlmError>) -> Self {
        match result {
            Ok(value) => Slice::Ready { value },
            Err(e) => {
                error!("Generation of {what} failed: {e}");
                Slice::Failed {
                    notice: Notice::generation_failed(what),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Slice::Ready { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchoolPlan {
    pub roadmap: Slice<SchoolRoadmap>,
    pub alternatives: Slice<CollegeAlternatives>,
}

/// Runs both generations concurrently and waits for both.
pub async fn plan_school(model: &dyn GenerativeModel, form: &SchoolForm) -> SchoolPlan {
    let student_profile = form.student_profile();
    let request = SchoolRoadmapRequest {
        student_profile: student_profile.clone(),
        learning_style: form.learning_style,
    };

    let (roadmap, alternatives) = tokio::join!(
        generate_school_roadmap(model, &request),
        suggest_college_alternatives(model, &student_profile),
    );

    let plan = SchoolPlan {
        roadmap: Slice::from_result("a school roadmap", roadmap),
        alternatives: Slice::from_result("college alternatives", alternatives),
    };
    info!(
        "School plan: roadmap ready={}, alternatives ready={}",
        plan.roadmap.is_ready(),
        plan.alternatives.is_ready()
    );
    plan
}
