pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::profiling::handlers as profiling;
use crate::state::AppState;
use crate::storage::handlers as storage;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/profiles/analyze", post(profiling::handle_analyze))
        .route("/api/v1/content/generate", post(generation::handle_generate))
        .route("/api/v1/content/imitate", post(generation::handle_imitate))
        .route("/api/v1/posts", post(storage::handle_save_post))
        .with_state(state)
}
