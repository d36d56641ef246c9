use std::sync::Arc;

use crate::assistant::service::AssistantService;
use crate::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Session and profile lookups. Postgres in production.
    pub profiles: Arc<dyn ProfileStore>,
    pub assistant: Arc<AssistantService>,
}
