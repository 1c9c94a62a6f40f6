//! API Router configuration

use super::handlers;
use super::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use loadwatch_observability::metrics::metrics_router;
use tower_http::trace::TraceLayer;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let registry = state.metrics.registry();
    let max_body_size = state.max_body_size;

    Router::new()
        .route(
            "/ingest",
            post(handlers::ingest)
                .fallback(handlers::post_only)
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    handlers::observe_ingest_latency,
                )),
        )
        .route(
            "/analyze",
            get(handlers::get_analysis).fallback(handlers::get_only),
        )
        .route("/health", get(handlers::health_check))
        .with_state(state)
        .merge(metrics_router(registry))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::pipeline::{AdmissionQueue, ResultCache, SampleReceiver};
    use crate::store::{InMemoryStore, WindowStore};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use loadwatch_observability::MetricsRegistry;
    use loadwatch_types::{Analysis, Sample, WindowStats};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Store whose every call fails
    struct UnreachableStore;

    #[async_trait]
    impl WindowStore for UnreachableStore {
        async fn ping(&self) -> StoreResult<()> {
            Err(StoreError::Connection("connection refused".to_string()))
        }
        async fn push_front(&self, _key: &str, _value: &str) -> StoreResult<()> {
            self.ping().await
        }
        async fn trim(&self, _key: &str, _len: usize) -> StoreResult<()> {
            self.ping().await
        }
        async fn range(&self, _key: &str, _len: usize) -> StoreResult<Vec<String>> {
            Err(StoreError::Connection("connection refused".to_string()))
        }
        async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Connection("connection refused".to_string()))
        }
        async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            self.ping().await
        }
    }

    /// Router with no workers attached; the receiver keeps the queue open
    fn app_with(store: Arc<dyn WindowStore>, capacity: usize) -> (Router, SampleReceiver, MetricsRegistry) {
        let metrics = MetricsRegistry::new().unwrap();
        let (queue, rx) = AdmissionQueue::new(capacity, metrics.metrics().ingest.clone());
        let cache = ResultCache::new(store, "last_analysis");
        let state = AppState::new(queue, cache, metrics.clone(), 64 * 1024);
        (create_router(state), rx, metrics)
    }

    fn post_ingest(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/ingest")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn ingest_accepts_and_stamps_sample() {
        let (app, rx, metrics) = app_with(Arc::new(InMemoryStore::new()), 10);

        let response = app
            .oneshot(post_ingest(r#"{"cpu":12,"rps":120}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(body_string(response).await, r#"{"status":"accepted"}"#);

        let sample = rx.recv().await.unwrap();
        assert_eq!(sample.cpu, 12.0);
        assert_eq!(sample.rps, 120.0);
        assert!(sample.timestamp > 0);
        assert_eq!(metrics.metrics().ingest.requests_total.get(), 1);
        assert_eq!(metrics.metrics().ingest.latency_seconds.get_sample_count(), 1);
    }

    #[tokio::test]
    async fn ingest_treats_null_fields_as_zero() {
        let (app, rx, _) = app_with(Arc::new(InMemoryStore::new()), 10);

        let response = app
            .oneshot(post_ingest(r#"{"cpu":null,"rps":1}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let sample = rx.recv().await.unwrap();
        assert_eq!(sample.cpu, 0.0);
        assert_eq!(sample.rps, 1.0);
    }

    #[tokio::test]
    async fn ingest_keeps_explicit_timestamp() {
        let (app, rx, _) = app_with(Arc::new(InMemoryStore::new()), 10);
        app.oneshot(post_ingest(r#"{"timestamp":1700000000,"cpu":1,"rps":2}"#))
            .await
            .unwrap();
        assert_eq!(rx.recv().await.unwrap().timestamp, 1_700_000_000);
    }

    #[tokio::test]
    async fn ingest_rejects_malformed_json() {
        let (app, _rx, metrics) = app_with(Arc::new(InMemoryStore::new()), 10);

        let response = app.oneshot(post_ingest(r#"{"cpu":"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response).await.starts_with("bad json:"));
        assert_eq!(metrics.metrics().ingest.requests_total.get(), 0);
        assert_eq!(metrics.metrics().ingest.latency_seconds.get_sample_count(), 1);
    }

    #[tokio::test]
    async fn ingest_latency_covers_rejected_requests() {
        let (app, _rx, metrics) = app_with(Arc::new(InMemoryStore::new()), 10);

        let response = app.clone().oneshot(get("/ingest")).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let oversized = format!(r#"{{"cpu":1,"rps":1,"pad":"{}"}}"#, "x".repeat(128 * 1024));
        let response = app.clone().oneshot(post_ingest(&oversized)).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        app.oneshot(get("/analyze")).await.unwrap();

        let ingest = &metrics.metrics().ingest;
        assert_eq!(ingest.latency_seconds.get_sample_count(), 2);
        assert_eq!(ingest.requests_total.get(), 0);
    }

    #[tokio::test]
    async fn ingest_reports_overload_when_queue_full() {
        let (app, _rx, metrics) = app_with(Arc::new(InMemoryStore::new()), 2);

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(post_ingest(r#"{"cpu":1,"rps":1}"#))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::ACCEPTED);
        }

        let response = app.oneshot(post_ingest(r#"{"cpu":1,"rps":1}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_string(response).await, "overloaded");
        assert_eq!(metrics.metrics().ingest.requests_total.get(), 2);
    }

    #[tokio::test]
    async fn wrong_methods_are_rejected() {
        let (app, _rx, _) = app_with(Arc::new(InMemoryStore::new()), 10);

        let response = app.clone().oneshot(get("/ingest")).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_string(response).await, "POST only");

        let request = Request::builder()
            .method("PUT")
            .uri("/ingest")
            .body(Body::from(r#"{"cpu":1,"rps":1}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn analyze_rejects_post() {
        let (app, _rx, _) = app_with(Arc::new(InMemoryStore::new()), 10);
        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_string(response).await, "GET only");
    }

    #[tokio::test]
    async fn analyze_without_data_is_no_content() {
        let (app, _rx, _) = app_with(Arc::new(InMemoryStore::new()), 10);
        let response = app.oneshot(get("/analyze")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn analyze_returns_cached_analysis() {
        let store = Arc::new(InMemoryStore::new());
        let analysis = Analysis::from_stats(
            WindowStats {
                count: 1,
                mean: 120.0,
                ..WindowStats::default()
            },
            &Sample::new(1_700_000_000, 12.0, 120.0),
            50,
            2.0,
            1_700_000_000,
        );
        ResultCache::new(store.clone(), "last_analysis")
            .persist(&analysis)
            .await
            .unwrap();

        let (app, _rx, _) = app_with(store, 10);
        let response = app.oneshot(get("/analyze")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["lastRps"], 120.0);
        assert_eq!(body["lastCpu"], 12.0);
        assert_eq!(body["rollingAvg"], 120.0);
        assert_eq!(body["isAnomaly"], false);
    }

    #[tokio::test]
    async fn analyze_store_failure_is_unavailable() {
        let (app, _rx, _) = app_with(Arc::new(UnreachableStore), 10);
        let response = app.oneshot(get("/analyze")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(body_string(response).await.starts_with("store error:"));
    }

    #[tokio::test]
    async fn metrics_are_exposed() {
        let (app, _rx, _) = app_with(Arc::new(InMemoryStore::new()), 10);
        app.clone()
            .oneshot(post_ingest(r#"{"cpu":1,"rps":1}"#))
            .await
            .unwrap();

        let response = app.oneshot(get("/metrics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let text = body_string(response).await;
        assert!(text.contains("ingest_requests_total 1"));
        assert!(text.contains("ingest_latency_seconds_count 1"));
        assert!(text.contains("rolling_avg_rps"));
        assert!(text.contains("anomalies_total"));
        assert!(text.contains("anomaly_rate"));
    }

    #[tokio::test]
    async fn health_reports_queue_depth() {
        let (app, _rx, _) = app_with(Arc::new(InMemoryStore::new()), 10);
        app.clone()
            .oneshot(post_ingest(r#"{"cpu":1,"rps":1}"#))
            .await
            .unwrap();

        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["queueDepth"], 1);
        assert_eq!(body["queueCapacity"], 10);
    }
}
