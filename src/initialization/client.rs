//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::{Config, USER_AGENT};
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used for every Porkbun API call.
///
/// Creates a `reqwest::Client` configured with:
/// - the exporter's User-Agent
/// - the configured upstream timeout, so a hung request releases its domain
///   task before the scrape deadline
/// - Rustls TLS backend (no native TLS)
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(config.upstream_timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(Arc::new(client))
}
