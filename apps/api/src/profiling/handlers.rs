//! Axum route handlers for the Profiling API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::profiling::profile::{TraitProfile, ValidationReport};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub sample: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub profile: TraitProfile,
    pub validation: ValidationReport,
}

/// POST /api/v1/profiles/analyze
///
/// Rates a writing sample against the trait schema. The profile is returned
/// as extracted; `validation` says how far it strays from the schema.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if request.sample.trim().is_empty() {
        return Err(AppError::Validation("sample cannot be empty".to_string()));
    }

    let profile = state.profiler.analyze(&request.sample).await?;
    let validation = profile.validate();

    Ok(Json(AnalyzeResponse {
        profile,
        validation,
    }))
}
