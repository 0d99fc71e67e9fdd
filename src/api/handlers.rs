use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppResult;
use crate::models::{RecommendationRequest, RecommendationResponse};

use super::AppState;

/// Recommendation payload returned to app clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendApiResponse {
    pub recommendations: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl From<RecommendationResponse> for RecommendApiResponse {
    fn from(response: RecommendationResponse) -> Self {
        Self {
            recommendations: response.recommendations,
            generated_at: Utc::now(),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Handler for the recommendations endpoint
///
/// Malformed JSON bodies (missing or mistyped fields) are rejected by the
/// `Json` extractor before this runs; everything else maps through
/// `AppError::into_response`.
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendApiResponse>> {
    let response = state.recommendations.recommend(request).await?;
    Ok(Json(response.into()))
}
