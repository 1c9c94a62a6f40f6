//! Metrics exporter for Prometheus scraping

use prometheus::{Encoder, Registry, TextEncoder};

/// Export metrics in Prometheus text format
pub fn export_metrics(registry: &Registry) -> crate::error::Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// HTTP handler for metrics endpoint (requires "http" feature)
#[cfg(feature = "http")]
pub mod http {
    use axum::{
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    use prometheus::Registry;
    use std::sync::Arc;

    /// Metrics endpoint state
    #[derive(Clone)]
    pub struct MetricsState {
        pub registry: Arc<Registry>,
    }

    impl MetricsState {
        pub fn new(registry: Arc<Registry>) -> Self {
            Self { registry }
        }
    }

    /// Handler for GET /metrics
    pub async fn metrics_handler(State(state): State<MetricsState>) -> Response {
        match super::export_metrics(&state.registry) {
            Ok(metrics) => (
                StatusCode::OK,
                [("content-type", prometheus::TEXT_FORMAT)],
                metrics,
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = %e, "metrics export failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }

    /// Create an axum router for metrics
    pub fn metrics_router(registry: Arc<Registry>) -> axum::Router {
        use axum::routing::get;

        axum::Router::new()
            .route("/metrics", get(metrics_handler))
            .with_state(MetricsState::new(registry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::IntCounter;

    #[test]
    fn test_export_metrics() {
        let registry = Registry::new();
        let counter = IntCounter::new("test_counter", "A test counter").unwrap();
        registry.register(Box::new(counter.clone())).unwrap();
        counter.inc();

        let output = export_metrics(&registry).unwrap();
        assert!(output.contains("test_counter 1"));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_metrics_router_serves_text_format() {
        use axum::body::{to_bytes, Body};
        use axum::http::{Request, StatusCode};
        use std::sync::Arc;
        use tower::ServiceExt;

        let registry = Arc::new(Registry::new());
        let counter = IntCounter::new("scraped_total", "A scraped counter").unwrap();
        registry.register(Box::new(counter.clone())).unwrap();
        counter.inc();

        let response = http::metrics_router(registry)
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("scraped_total 1"));
    }
}
