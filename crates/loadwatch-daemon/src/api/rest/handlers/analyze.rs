//! Analysis query handler

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Return the last published analysis, or 204 if none exists yet
pub async fn get_analysis(State(state): State<AppState>) -> ApiResult<Response> {
    match state.cache.read().await {
        Ok(Some(analysis)) => Ok(Json(analysis).into_response()),
        Ok(None) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e) => {
            tracing::warn!(error = %e, "analysis read failed");
            Err(e.into())
        }
    }
}

/// Any method other than GET on /analyze
pub async fn get_only() -> ApiError {
    ApiError::MethodNotAllowed("GET only")
}
