//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::persona::Persona;
use crate::profiling::profile::TraitProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub persona: Persona,
    pub topic: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ImitateRequest {
    pub sample: String,
    pub topic: String,
}

#[derive(Debug, Serialize)]
pub struct ImitateResponse {
    pub profile: TraitProfile,
    pub content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/content/generate
///
/// Writes about `topic` in the voice of `persona`. Missing persona fields are
/// rendered as placeholders, not rejected.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if request.topic.trim().is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }

    let content = state
        .generator
        .generate(&request.persona, &request.topic)
        .await?;

    Ok(Json(GenerateResponse { content }))
}

/// POST /api/v1/content/imitate
///
/// Profile a sample, then write about `topic` in that voice: analyze → persona → generate.
pub async fn handle_imitate(
    State(state): State<AppState>,
    Json(request): Json<ImitateRequest>,
) -> Result<Json<ImitateResponse>, AppError> {
    if request.sample.trim().is_empty() {
        return Err(AppError::Validation("sample cannot be empty".to_string()));
    }
    if request.topic.trim().is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }

    let profile = state.profiler.analyze(&request.sample).await?;
    let persona = Persona::from_profile(&profile);
    let content = state.generator.generate(&persona, &request.topic).await?;

    Ok(Json(ImitateResponse { profile, content }))
}
