//! HTTP server exposing the exporter.
//!
//! Provides three endpoints:
//! - `/` - landing page
//! - `/healthz` - liveness probe
//! - the configured metrics path - Prometheus text format, one scrape per request

mod handlers;
mod types;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::HEALTH_PATH;
use handlers::{healthz_handler, metrics_handler, root_handler};
pub use handlers::scrape_deadline;
pub use types::AppState;

/// Builds the router for `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route(HEALTH_PATH, get(healthz_handler))
        .route(&state.metrics_path, get(metrics_handler))
        .with_state(state)
}

/// Serves on an already bound listener until the server fails.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), anyhow::Error> {
    axum::serve(listener, build_router(state))
        .await
        .map_err(|e| anyhow::anyhow!("Status server error: {}", e))
}

/// Binds `endpoint` and serves the exporter on it.
pub async fn start_status_server(endpoint: &str, state: AppState) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind(endpoint)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind status server to {}: {}", endpoint, e))?;

    log::info!("Status server listening on http://{}/", endpoint);
    log::info!("  - Metrics: http://{}{}", endpoint, state.metrics_path);
    log::info!("  - Health: http://{}{}", endpoint, HEALTH_PATH);

    serve(listener, state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{ExporterCollector, ScrapeOrchestrator};
    use std::sync::Arc;
    use std::time::Duration;

    fn state() -> AppState {
        AppState {
            orchestrator: Arc::new(ScrapeOrchestrator::new(vec![Arc::new(
                ExporterCollector::new("0.1.0", "abc123", "6.1.0", 1_700_000_000),
            )])),
            metrics_path: "/metrics".to_string(),
            scrape_timeout: Duration::from_secs(5),
        }
    }

    async fn spawn_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, state()));
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_start_status_server_port_binding_failure() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = taken.local_addr().unwrap().to_string();

        let err = start_status_server(&endpoint, state()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to bind status server"));
        assert!(err.to_string().contains(&endpoint));
    }

    #[tokio::test]
    async fn test_healthz_and_root() {
        let base = spawn_server().await;

        let health = reqwest::get(format!("{base}/healthz")).await.unwrap();
        assert_eq!(health.status(), 200);
        assert_eq!(health.text().await.unwrap(), "ok");

        let root = reqwest::get(format!("{base}/")).await.unwrap().text().await.unwrap();
        assert!(root.contains(r#"href="/metrics""#));
    }

    #[tokio::test]
    async fn test_metrics_endpoint_serves_text_format() {
        let base = spawn_server().await;

        let response = reqwest::get(format!("{base}/metrics")).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()[reqwest::header::CONTENT_TYPE],
            prometheus::TEXT_FORMAT
        );
        let body = response.text().await.unwrap();
        assert!(body.contains("# TYPE porkbun_exporter_build_info gauge"));
        assert!(body.contains("porkbun_exporter_start_time 1700000000"));
    }
}
