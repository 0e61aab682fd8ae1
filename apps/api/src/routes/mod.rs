pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::flows::handlers as tools;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Guided career pipeline (session-scoped)
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/profile",
            post(session::handle_submit_profile),
        )
        .route(
            "/api/v1/sessions/:id/career",
            post(session::handle_select_career),
        )
        .route(
            "/api/v1/sessions/:id/roadmap",
            post(session::handle_build_roadmap),
        )
        .route(
            "/api/v1/sessions/:id/roadmap/view",
            get(session::handle_roadmap_view),
        )
        .route(
            "/api/v1/sessions/:id/narration/:action",
            post(session::handle_narration),
        )
        // Standalone tools
        .route("/api/v1/explore", post(tools::handle_explore))
        .route("/api/v1/school/roadmap", post(tools::handle_school_roadmap))
        .route("/api/v1/school/plan", post(tools::handle_school_plan))
        .route(
            "/api/v1/suggest/colleges",
            post(tools::handle_suggest_colleges),
        )
        .route(
            "/api/v1/suggest/companies",
            post(tools::handle_suggest_companies),
        )
        .route(
            "/api/v1/suggest/college-alternatives",
            post(tools::handle_college_alternatives),
        )
        .route(
            "/api/v1/suggest/company-alternatives",
            post(tools::handle_company_alternatives),
        )
        .with_state(state)
}
