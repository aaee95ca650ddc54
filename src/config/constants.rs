//! Configuration constants.
//!
//! This module defines the defaults and fixed names used throughout the exporter,
//! including upstream pacing, timeouts and metric naming.

use std::time::Duration;

/// Environment variable holding the Porkbun API key
pub const APIKEY_ENV: &str = "APIKEY";
/// Environment variable holding the Porkbun secret API key
pub const SECRET_ENV: &str = "SECRET";

/// Porkbun JSON API base URL (v3)
pub const DEFAULT_API_BASE_URL: &str = "https://api.porkbun.com/api/json/v3";

/// Default HTTP listen address
pub const DEFAULT_ENDPOINT: &str = "0.0.0.0:8080";
/// Default path on which metrics are served
pub const DEFAULT_METRICS_PATH: &str = "/metrics";
/// Liveness probe path
pub const HEALTH_PATH: &str = "/healthz";

// Upstream pacing
/// Interval between DNS record requests, in milliseconds.
/// Porkbun allows 1 query/second per API key.
pub const DNS_RATE_INTERVAL_MS: u64 = 1000;
/// Interval between SSL bundle requests, in milliseconds.
/// The /ssl endpoint still returns 503s at 1 qps; 0.5 qps is reliable.
pub const SSL_RATE_INTERVAL_MS: u64 = 2000;

// Network operation timeouts
/// Per-request timeout for calls to the Porkbun API
pub const UPSTREAM_TIMEOUT_SECS: u64 = 10;
/// Default scrape deadline when the scraper does not announce one
pub const SCRAPE_TIMEOUT_SECS: u64 = 30;
/// Safety margin subtracted from the scraper's announced timeout so the
/// response still reaches it in time
pub const SCRAPE_TIMEOUT_MARGIN: Duration = Duration::from_millis(500);
/// Header Prometheus sends with every scrape
pub const SCRAPE_TIMEOUT_HEADER: &str = "X-Prometheus-Scrape-Timeout-Seconds";

// Metric naming
pub const METRIC_NAMESPACE: &str = "porkbun";
pub const EXPORTER_SUBSYSTEM: &str = "exporter";

/// Maximum number of upstream body characters kept in an error
pub const MAX_ERROR_BODY_CHARS: usize = 200;

/// User-Agent sent to the Porkbun API
pub const USER_AGENT: &str = concat!("porkbun_exporter/", env!("CARGO_PKG_VERSION"));
