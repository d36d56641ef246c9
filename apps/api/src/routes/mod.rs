pub mod health;

use axum::{routing::get, Router};

use crate::assistant::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/rojgaar-assistant",
            get(handlers::handle_tip).post(handlers::handle_chat),
        )
        .with_state(state)
}
