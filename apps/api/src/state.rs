use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::GenerativeBackend;
use crate::search::SearchBackend;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Gemini in production; any `GenerativeBackend` in tests.
    pub llm: Arc<dyn GenerativeBackend>,
    /// DuckDuckGo in production; any `SearchBackend` in tests.
    pub search: Arc<dyn SearchBackend>,
    pub sessions: SessionStore,
}
