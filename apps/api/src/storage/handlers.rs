//! Axum route handlers for saving generated posts.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::SavedPost;

#[derive(Debug, Deserialize)]
pub struct SavePostRequest {
    pub title: String,
    pub content: String,
}

/// POST /api/v1/posts
pub async fn handle_save_post(
    State(state): State<AppState>,
    Json(request): Json<SavePostRequest>,
) -> Result<(StatusCode, Json<SavedPost>), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let saved = state.store.save(&request.content, &request.title).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}
