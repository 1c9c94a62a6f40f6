//! Sample ingestion handler

use crate::api::rest::state::AppState;
use crate::error::{AdmissionError, ApiError, ApiResult};
use axum::{
    body::Bytes,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use loadwatch_types::Sample;
use serde::Serialize;

/// Ingest response
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub status: &'static str,
}

/// Admit a sample for analysis
///
/// Returns as soon as the sample is queued; processing happens later on a
/// worker and its failures are never reported back here.
pub async fn ingest(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<IngestResponse>)> {
    let sample: Sample =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let sample = sample.stamped(chrono::Utc::now().timestamp());

    if let Err(e) = state.queue.admit(sample) {
        if e == AdmissionError::Overloaded {
            tracing::debug!(capacity = state.queue.capacity(), "admission queue full");
        }
        return Err(e.into());
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(IngestResponse { status: "accepted" }),
    ))
}

/// Any method other than POST on /ingest
pub async fn post_only() -> ApiError {
    ApiError::MethodNotAllowed("POST only")
}

/// Observe the latency of every request routed to /ingest, rejected ones included
pub async fn observe_ingest_latency(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let _timer = state.metrics.metrics().ingest.start_timer();
    next.run(request).await
}
