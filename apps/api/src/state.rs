use std::sync::Arc;

use crate::llm_client::GenerativeModel;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The generative backend. `GeminiClient` in production, a scripted double in tests.
    pub model: Arc<dyn GenerativeModel>,
    pub sessions: SessionStore,
}
