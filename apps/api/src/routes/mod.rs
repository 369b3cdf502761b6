pub mod health;

use axum::{routing::get, Router};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Voice-assistant tool endpoint
        .route(
            "/api/vapi/generate",
            get(handlers::handle_generate_probe).post(handlers::handle_generate),
        )
        .with_state(state)
}
