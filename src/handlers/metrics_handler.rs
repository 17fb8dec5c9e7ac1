use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Prometheus text exposition of the quote counters
pub async fn metrics(State(handle): State<Arc<PrometheusHandle>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        handle.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{record_ledger_write, record_quote};

    #[tokio::test]
    async fn test_metrics_exposes_quote_counters() {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = Arc::new(recorder.handle());

        ::metrics::with_local_recorder(&recorder, || {
            record_quote("gcode", 42.0);
            record_ledger_write(true);
        });

        let response = metrics(State(handle)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            PROMETHEUS_CONTENT_TYPE
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("print_quote_quotes_total{source=\"gcode\"} 1"));
        assert!(text.contains("print_quote_ledger_writes_total{status=\"saved\"} 1"));
    }
}
