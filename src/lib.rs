//! porkbun_exporter library: Prometheus exporter for Porkbun-managed domains
//!
//! For every configured domain, the exporter counts the DNS records Porkbun
//! holds (by type, and optionally by name) and reports whether Porkbun returns
//! an SSL bundle for it. Every scrape calls the Porkbun API afresh; calls are
//! paced per endpoint by an injected `RateLimiter`.
//!
//! # Example
//!
//! ```no_run
//! use porkbun_exporter::{run_exporter, Config, Credentials};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::new(
//!     Credentials {
//!         apikey: "pk1_...".to_string(),
//!         secret: "sk1_...".to_string(),
//!     },
//!     vec!["example.com".to_string()],
//! );
//!
//! run_exporter(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod collector;
pub mod config;
pub mod error_handling;
pub mod exposition;
pub mod initialization;
pub mod porkbun;
pub mod rate_limiter;
pub mod status_server;

use std::sync::Arc;

use anyhow::Context;

// Re-export public API
pub use collector::{
    Collector, DomainCollector, ExporterCollector, MetricDescriptor, Observation,
    ScrapeOrchestrator, ScrapeResult, SslCollector,
};
pub use config::{Config, Credentials, LogFormat, LogLevel, Opt, RecordGranularity};
pub use porkbun::{PorkbunClient, RegistrarApi};
pub use rate_limiter::RateLimiter;
pub use status_server::{build_router, AppState};

/// Wires the collectors for `config` around `client`.
///
/// The `/dns` and `/ssl` endpoints get a limiter each; both are owned by the
/// returned orchestrator and shared by every scrape.
pub fn build_orchestrator(config: &Config, client: Arc<dyn RegistrarApi>) -> ScrapeOrchestrator {
    let dns_limiter = Arc::new(RateLimiter::new("dns", config.dns_interval));
    let ssl_limiter = Arc::new(RateLimiter::new("ssl", config.ssl_interval));

    ScrapeOrchestrator::new(vec![
        Arc::new(ExporterCollector::from_build_env()),
        Arc::new(DomainCollector::new(
            Arc::clone(&client),
            dns_limiter,
            config.domains.clone(),
            config.record_granularity,
        )),
        Arc::new(SslCollector::new(client, ssl_limiter, config.domains.clone())),
    ])
}

/// Builds the app state for `config`, talking to the Porkbun API over HTTP.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let http = initialization::init_client(config).context("Failed to initialize HTTP client")?;
    let client: Arc<dyn RegistrarApi> = Arc::new(PorkbunClient::new(
        http,
        config.api_base_url.as_str(),
        config.credentials.clone(),
    ));

    Ok(AppState {
        orchestrator: Arc::new(build_orchestrator(config, client)),
        metrics_path: config.metrics_path.clone(),
        scrape_timeout: config.scrape_timeout,
    })
}

/// Runs the exporter until the HTTP server fails.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the HTTP client cannot be
/// built, or the server cannot bind or stops with an error.
pub async fn run_exporter(config: Config) -> anyhow::Result<()> {
    config.validate()?;
    log::info!(
        "Exporting {} domain(s): {}",
        config.domains.len(),
        config.domains.join(", ")
    );
    log::info!(
        "Upstream pacing: dns every {}ms, ssl every {}ms",
        config.dns_interval.as_millis(),
        config.ssl_interval.as_millis()
    );

    let state = build_state(&config)?;
    status_server::start_status_server(&config.endpoint, state).await
}
