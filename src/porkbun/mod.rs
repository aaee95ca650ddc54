//! Porkbun registrar API access.
//!
//! The collectors only see the `RegistrarApi` trait; `PorkbunClient` is the
//! production implementation on top of `reqwest`.

mod client;
mod types;

use async_trait::async_trait;

use crate::error_handling::UpstreamError;

pub use client::PorkbunClient;
pub use types::{DnsRecord, SslBundle};

/// Read-only registrar operations used by the collectors.
#[async_trait]
pub trait RegistrarApi: Send + Sync + 'static {
    /// Retrieves every DNS record of `domain`.
    async fn fetch_records(&self, domain: &str) -> Result<Vec<DnsRecord>, UpstreamError>;

    /// Retrieves the SSL bundle of `domain`. An `Ok` means the bundle exists.
    async fn probe_certificate_bundle(&self, domain: &str) -> Result<SslBundle, UpstreamError>;
}
