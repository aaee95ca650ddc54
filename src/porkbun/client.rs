//! `reqwest`-based Porkbun API client.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::types::{AuthRequest, DnsRecord, RecordsResponse, SslBundle};
use super::RegistrarApi;
use crate::config::{Credentials, MAX_ERROR_BODY_CHARS};
use crate::error_handling::UpstreamError;

const STATUS_SUCCESS: &str = "SUCCESS";

/// Porkbun JSON API v3 client.
///
/// Every endpoint is a `POST` with the credentials in the JSON body. Pacing is
/// not handled here; callers wait on a `RateLimiter` first.
pub struct PorkbunClient {
    http: Arc<reqwest::Client>,
    base_url: String,
    credentials: Credentials,
}

impl PorkbunClient {
    pub fn new(
        http: Arc<reqwest::Client>,
        base_url: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        PorkbunClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .json(&AuthRequest {
                apikey: &self.credentials.apikey,
                secretapikey: &self.credentials.secret,
            })
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_envelope(status, &body)
    }
}

#[async_trait]
impl RegistrarApi for PorkbunClient {
    async fn fetch_records(&self, domain: &str) -> Result<Vec<DnsRecord>, UpstreamError> {
        let response: RecordsResponse = self.post(&format!("dns/retrieve/{domain}")).await?;
        Ok(response.records)
    }

    async fn probe_certificate_bundle(&self, domain: &str) -> Result<SslBundle, UpstreamError> {
        self.post(&format!("ssl/retrieve/{domain}")).await
    }
}

/// Interprets a Porkbun response body.
///
/// - JSON with `"status":"SUCCESS"` decodes into `T`
/// - any other JSON is Porkbun's error envelope (`UpstreamError::Api`)
/// - a body that is not JSON at all (the HTML 503 page) is `UpstreamError::Unavailable`
fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, UpstreamError> {
    let envelope: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => {
            return Err(UpstreamError::Unavailable {
                status,
                body: condense_body(body),
            })
        }
    };

    match envelope.get("status").and_then(|s| s.as_str()) {
        Some(STATUS_SUCCESS) => {
            serde_json::from_value(envelope).map_err(|e| UpstreamError::Decode(e.to_string()))
        }
        _ => {
            let message = envelope
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("no message")
                .to_string();
            Err(UpstreamError::Api { status, message })
        }
    }
}

/// Collapses whitespace and truncates a body for inclusion in an error.
fn condense_body(body: &str) -> String {
    let condensed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if condensed.chars().count() > MAX_ERROR_BODY_CHARS {
        let truncated: String = condensed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{truncated}...")
    } else {
        condensed
    }
}
