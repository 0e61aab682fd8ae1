//! Axum route handlers for the session-scoped career pipeline.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::flows::recommendation::CareerRecommendation;
use crate::flows::roadmap::Roadmap;
use crate::flows::skill_gap::SkillGapAnalysis;
use crate::models::forms::validate_form;
use crate::models::profile::StudentProfile;
use crate::render::{self, RoadmapView, ViewFormat};
use crate::session::narration::{Playback, PlaybackAction};
use crate::session::{pipeline, Session};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSession {
    pub session_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CareerSelection {
    #[validate(length(min = 1, message = "Please choose a career path."))]
    pub career_path: String,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub format: ViewFormat,
}

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    pub text: Option<String>,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreatedSession>) {
    let session = state.sessions.create();
    (
        StatusCode::CREATED,
        Json(CreatedSession {
            session_id: session.id,
        }),
    )
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.sessions.get(id)?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/profile
pub async fn handle_submit_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(profile): Json<StudentProfile>,
) -> Result<Json<CareerRecommendation>, AppError> {
    let result =
        pipeline::submit_profile(&state.sessions, state.model.as_ref(), id, profile).await?;
    Ok(Json(result))
}

/// POST /api/v1/sessions/:id/career
pub async fn handle_select_career(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(selection): Json<CareerSelection>,
) -> Result<Json<SkillGapAnalysis>, AppError> {
    validate_form(&selection)?;
    let result = pipeline::select_career(
        &state.sessions,
        state.model.as_ref(),
        id,
        selection.career_path,
    )
    .await?;
    Ok(Json(result))
}

/// POST /api/v1/sessions/:id/roadmap
pub async fn handle_build_roadmap(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Roadmap>, AppError> {
    let result = pipeline::build_roadmap(&state.sessions, state.model.as_ref(), id).await?;
    Ok(Json(result))
}

/// GET /api/v1/sessions/:id/roadmap/view?format=...
///
/// An absent roadmap renders as an empty view.
pub async fn handle_roadmap_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<RoadmapView>, AppError> {
    let session = state.sessions.get(id)?;
    let milestones = session
        .roadmap
        .map(|r| r.milestones)
        .unwrap_or_default();
    Ok(Json(render::render(query.format, &milestones)))
}

/// POST /api/v1/sessions/:id/narration/:action
///
/// `play` speaks the given text, else the roadmap's narration script, else
/// the roadmap's plain-text rendering.
pub async fn handle_narration(
    State(state): State<AppState>,
    Path((id, action)): Path<(Uuid, PlaybackAction)>,
    body: Option<Json<PlayRequest>>,
) -> Result<Json<Playback>, AppError> {
    let text = body.and_then(|Json(b)| b.text);

    let playback = state.sessions.with_session(id, |s| {
        match action {
            PlaybackAction::Play => {
                let text = text
                    .or_else(|| playback_text(s))
                    .ok_or_else(|| AppError::Conflict("There is nothing to narrate yet".to_string()))?;
                s.narration.play(text);
            }
            PlaybackAction::Pause => s.narration.pause().map_err(conflict)?,
            PlaybackAction::Resume => s.narration.resume().map_err(conflict)?,
            PlaybackAction::Stop => s.narration.stop(),
            PlaybackAction::Finish => s.narration.finish().map_err(conflict)?,
        }
        Ok::<_, AppError>(s.narration.clone())
    })??;

    Ok(Json(playback))
}

fn playback_text(session: &Session) -> Option<String> {
    let roadmap = session.roadmap.as_ref()?;
    match &roadmap.narration {
        Some(narration) => Some(narration.script.clone()),
        None if roadmap.milestones.is_empty() => None,
        None => Some(render::plain_text(&roadmap.milestones)),
    }
}

fn conflict(err: impl ToString) -> AppError {
    AppError::Conflict(err.to_string())
}
