//! Prometheus metrics handler.

use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use super::super::types::AppState;
use crate::config::{SCRAPE_TIMEOUT_HEADER, SCRAPE_TIMEOUT_MARGIN};
use crate::exposition;

/// Runs one scrape and renders it in the Prometheus text format.
///
/// Domains that fail (or are still pending at the deadline) are simply absent
/// from the output; the response itself is `200` unless encoding fails.
pub async fn metrics_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let deadline = scrape_deadline(&headers, state.scrape_timeout);
    let result = state.orchestrator.collect_with_deadline(deadline).await;

    match exposition::encode(&result.descriptors, &result.observations) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            body,
        )
            .into_response(),
        Err(e) => {
            log::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
                .into_response()
        }
    }
}

/// Deadline for a scrape: the scraper's announced timeout minus a margin,
/// never above `default`. A missing or malformed header yields `default`.
pub fn scrape_deadline(headers: &HeaderMap, default: Duration) -> Duration {
    let announced = headers
        .get(SCRAPE_TIMEOUT_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .map(Duration::from_secs_f64);

    match announced {
        Some(timeout) if timeout > SCRAPE_TIMEOUT_MARGIN => {
            (timeout - SCRAPE_TIMEOUT_MARGIN).min(default)
        }
        Some(timeout) => timeout.min(default),
        None => default,
    }
}
