//! Landing page and liveness handlers.

use axum::{extract::State, response::Html};

use super::super::types::AppState;
use crate::config::HEALTH_PATH;

/// HTML landing page linking the metrics and health endpoints
pub async fn root_handler(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<html>
<head><title>Porkbun Exporter</title></head>
<body>
<h1>Porkbun Exporter</h1>
<ul>
<li><a href="{metrics}">metrics</a></li>
<li><a href="{health}">healthz</a></li>
</ul>
</body>
</html>"#,
        metrics = state.metrics_path,
        health = HEALTH_PATH,
    ))
}

/// Liveness probe; never touches the Porkbun API
pub async fn healthz_handler() -> &'static str {
    "ok"
}
