//! Axum route handlers for the standalone tools (no session state).

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::flows::exploration::{explore_career_paths, CareerExploration, ExplorationRequest};
use crate::flows::roadmap::{generate_school_roadmap, SchoolRoadmap, SchoolRoadmapRequest};
use crate::flows::school_plan::{plan_school, SchoolPlan};
use crate::flows::suggestions::{
    suggest_college_alternatives, suggest_colleges, suggest_companies,
    suggest_company_alternatives, CollegeAlternatives, CollegeSuggestions, CompanyAlternatives,
    CompanySuggestions,
};
use crate::models::forms::{
    validate_form, CollegeAlternativesForm, CollegeSearchForm, CompanyAlternativesForm,
    CompanySearchForm, ExplorerForm, SchoolForm,
};
use crate::state::AppState;

/// POST /api/v1/explore
pub async fn handle_explore(
    State(state): State<AppState>,
    Json(form): Json<ExplorerForm>,
) -> Result<Json<CareerExploration>, AppError> {
    validate_form(&form)?;
    let request = ExplorationRequest::from(form);
    let result = explore_career_paths(state.model.as_ref(), &request)
        .await
        .map_err(AppError::generation("career explorations"))?;
    Ok(Json(result))
}

/// POST /api/v1/school/roadmap
pub async fn handle_school_roadmap(
    State(state): State<AppState>,
    Json(form): Json<SchoolForm>,
) -> Result<Json<SchoolRoadmap>, AppError> {
    validate_form(&form)?;
    let request = SchoolRoadmapRequest {
        student_profile: form.student_profile(),
        learning_style: form.learning_style,
    };
    let result = generate_school_roadmap(state.model.as_ref(), &request)
        .await
        .map_err(AppError::generation("a school roadmap"))?;
    Ok(Json(result))
}

/// POST /api/v1/school/plan
///
/// Roadmap and college alternatives in one response; each slice reports its own failure.
pub async fn handle_school_plan(
    State(state): State<AppState>,
    Json(form): Json<SchoolForm>,
) -> Result<Json<SchoolPlan>, AppError> {
    validate_form(&form)?;
    Ok(Json(plan_school(state.model.as_ref(), &form).await))
}

/// POST /api/v1/suggest/colleges
pub async fn handle_suggest_colleges(
    State(state): State<AppState>,
    Json(form): Json<CollegeSearchForm>,
) -> Result<Json<CollegeSuggestions>, AppError> {
    validate_form(&form)?;
    let result = suggest_colleges(state.model.as_ref(), &form)
        .await
        .map_err(AppError::generation("college suggestions"))?;
    Ok(Json(result))
}

/// POST /api/v1/suggest/companies
pub async fn handle_suggest_companies(
    State(state): State<AppState>,
    Json(form): Json<CompanySearchForm>,
) -> Result<Json<CompanySuggestions>, AppError> {
    validate_form(&form)?;
    let result = suggest_companies(state.model.as_ref(), &form.career_path)
        .await
        .map_err(AppError::generation("company suggestions"))?;
    Ok(Json(result))
}

/// POST /api/v1/suggest/college-alternatives
pub async fn handle_college_alternatives(
    State(state): State<AppState>,
    Json(form): Json<CollegeAlternativesForm>,
) -> Result<Json<CollegeAlternatives>, AppError> {
    validate_form(&form)?;
    let result = suggest_college_alternatives(state.model.as_ref(), &form.student_profile)
        .await
        .map_err(AppError::generation("college alternatives"))?;
    Ok(Json(result))
}

/// POST /api/v1/suggest/company-alternatives
pub async fn handle_company_alternatives(
    State(state): State<AppState>,
    Json(form): Json<CompanyAlternativesForm>,
) -> Result<Json<CompanyAlternatives>, AppError> {
    validate_form(&form)?;
    let result = suggest_company_alternatives(state.model.as_ref(), &form)
        .await
        .map_err(AppError::generation("company alternatives"))?;
    Ok(Json(result))
}
