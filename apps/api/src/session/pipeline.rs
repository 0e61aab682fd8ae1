//! The user-gated career pipeline: profile → recommendations → selection →
//! skill gaps → roadmap (→ narration for auditory learners).
//!
//! Each step issues exactly one model call (the roadmap step issues a second
//! one only for narration). Inputs are snapshotted under the store lock, the
//! lock is released for the call, and results are committed afterwards.

use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::flows::recommendation::{recommend_career_paths, CareerRecommendation};
use crate::flows::roadmap::{generate_roadmap, Roadmap, RoadmapRequest};
use crate::flows::skill_gap::{analyze_skill_gaps, SkillGapAnalysis};
use crate::llm_client::GenerativeModel;
use crate::models::forms::validate_form;
use crate::models::profile::StudentProfile;
use crate::session::{SessionStore, Step};

/// Stores the profile and asks for career recommendations.
///
/// Everything derived from a previous profile is cleared on entry and stays
/// cleared if the call fails.
pub async fn submit_profile(
    store: &SessionStore,
    model: &dyn GenerativeModel,
    id: Uuid,
    profile: StudentProfile,
) -> Result<CareerRecommendation, AppError> {
    validate_form(&profile)?;

    let (_guard, profile) = store.begin_step(id, Step::Recommendations, |s| {
        s.replace_profile(profile.clone());
        Ok(profile)
    })?;

    let recommendations = recommend_career_paths(model, &profile)
        .await
        .map_err(AppError::generation("career recommendations"))?;
    info!(
        "Session {id}: {} career options recommended",
        recommendations.career_options.len()
    );

    store.with_session(id, |s| {
        s.recommendations = Some(recommendations.clone());
    })?;
    Ok(recommendations)
}

/// Records the chosen career and analyses the student's skill gaps for it.
///
/// Re-selecting while a previous analysis is running is allowed; the older
/// result is discarded when it arrives.
pub async fn select_career(
    store: &SessionStore,
    model: &dyn GenerativeModel,
    id: Uuid,
    career: String,
) -> Result<SkillGapAnalysis, AppError> {
    let (epoch, skills) = store.with_session(id, |s| {
        let skills = s
            .profile
            .as_ref()
            .map(StudentProfile::skill_list)
            .ok_or_else(|| {
                AppError::Conflict("Submit a profile before selecting a career".to_string())
            })?;
        Ok::<_, AppError>((s.select(career.clone()), skills))
    })??;

    let gaps = analyze_skill_gaps(model, &career, &skills)
        .await
        .map_err(AppError::generation("skill gaps"))?;

    store.with_session(id, |s| {
        if s.selection_epoch() != epoch {
            warn!("Session {id}: discarding skill gaps for superseded selection '{career}'");
            return Err(superseded());
        }
        s.skill_gaps = Some(gaps.clone());
        Ok(())
    })??;
    Ok(gaps)
}

/// Builds the roadmap for the current selection from the stored profile and gaps.
pub async fn build_roadmap(
    store: &SessionStore,
    model: &dyn GenerativeModel,
    id: Uuid,
) -> Result<Roadmap, AppError> {
    let (_guard, (request, epoch)) = store.begin_step(id, Step::Roadmap, |s| {
        let missing = |what: &str| AppError::Conflict(format!("{what} is required first"));
        let profile = s.profile.as_ref().ok_or_else(|| missing("A profile"))?;
        let career = s
            .selected_career
            .clone()
            .ok_or_else(|| missing("A career selection"))?;
        let gaps = s
            .skill_gaps
            .as_ref()
            .ok_or_else(|| missing("A skill-gap analysis"))?;

        let request = RoadmapRequest {
            student_profile: profile.summary(),
            career_path: career,
            current_skills: profile.skills.clone(),
            skill_gaps: gaps.summary(),
            learning_style: profile.learning_style,
        };
        s.roadmap = None;
        s.narration.reset();
        Ok((request, s.selection_epoch()))
    })?;

    let roadmap = generate_roadmap(model, &request)
        .await
        .map_err(AppError::generation("a roadmap"))?;

    store.with_session(id, |s| {
        if s.selection_epoch() != epoch {
            warn!(
                "Session {id}: discarding roadmap for superseded selection '{}'",
                request.career_path
            );
            return Err(superseded());
        }
        s.roadmap = Some(roadmap.clone());
        Ok(())
    })??;
    Ok(roadmap)
}

fn superseded() -> AppError {
    AppError::Conflict("The career selection changed while this was generating".to_string())
}
