//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and the library-level `Config` built from them.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_ENDPOINT, DEFAULT_METRICS_PATH, DNS_RATE_INTERVAL_MS,
    SCRAPE_TIMEOUT_SECS, SSL_RATE_INTERVAL_MS, UPSTREAM_TIMEOUT_SECS,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Label granularity of the DNS record gauge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RecordGranularity {
    /// One series per (domain, type)
    Type,
    /// One series per (domain, type, name)
    TypeAndName,
}

/// Command-line options.
///
/// Credentials normally come from `APIKEY` and `SECRET` in the environment (or
/// a `.env` file). The hidden `--apikey` and `--secret` flags override them, but
/// values passed that way are visible in process listings.
///
/// # Examples
///
/// ```bash
/// APIKEY=pk1_... SECRET=sk1_... porkbun_exporter --domains example.com,example.org
///
/// # Coarser DNS labels and a custom listen address
/// porkbun_exporter --domains example.com --record-granularity type --endpoint 127.0.0.1:9000
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "porkbun_exporter",
    about = "Exports Porkbun DNS record and SSL bundle status as Prometheus metrics."
)]
pub struct Opt {
    /// Comma-separated list of domains
    #[arg(long, env = "DOMAINS", default_value = "")]
    pub domains: String,

    /// Address the HTTP server listens on
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Path on which Prometheus metrics are served
    #[arg(long, default_value = DEFAULT_METRICS_PATH)]
    pub path: String,

    /// Label granularity of the DNS record gauge: type|type-and-name
    #[arg(long, value_enum, default_value_t = RecordGranularity::TypeAndName)]
    pub record_granularity: RecordGranularity,

    /// Minimum interval between DNS record requests, in milliseconds
    #[arg(long, default_value_t = DNS_RATE_INTERVAL_MS)]
    pub dns_interval_ms: u64,

    /// Minimum interval between SSL bundle requests, in milliseconds
    #[arg(long, default_value_t = SSL_RATE_INTERVAL_MS)]
    pub ssl_interval_ms: u64,

    /// Per-request timeout for the Porkbun API, in seconds
    #[arg(long, default_value_t = UPSTREAM_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Scrape deadline used when the scraper does not send one, in seconds
    #[arg(long, default_value_t = SCRAPE_TIMEOUT_SECS)]
    pub scrape_timeout_seconds: u64,

    /// Porkbun API base URL
    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Porkbun API key; prefer the `APIKEY` environment variable
    #[arg(long, env = "APIKEY", hide = true, hide_env_values = true)]
    pub apikey: Option<String>,

    /// Porkbun secret API key; prefer the `SECRET` environment variable
    #[arg(long, env = "SECRET", hide = true, hide_env_values = true)]
    pub secret: Option<String>,
}

/// Porkbun API credentials.
#[derive(Clone)]
pub struct Credentials {
    pub apikey: String,
    pub secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("apikey", &"<redacted>")
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Library configuration (no CLI dependencies).
///
/// Built once at startup; nothing in it changes while the exporter runs.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub domains: Vec<String>,
    pub endpoint: String,
    pub metrics_path: String,
    pub record_granularity: RecordGranularity,
    pub dns_interval: Duration,
    pub ssl_interval: Duration,
    pub upstream_timeout: Duration,
    pub scrape_timeout: Duration,
    pub api_base_url: String,
}

impl Config {
    /// Creates a configuration with default settings for the given credentials
    /// and domains.
    pub fn new(credentials: Credentials, domains: Vec<String>) -> Self {
        Self {
            credentials,
            domains,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            metrics_path: DEFAULT_METRICS_PATH.to_string(),
            record_granularity: RecordGranularity::TypeAndName,
            dns_interval: Duration::from_millis(DNS_RATE_INTERVAL_MS),
            ssl_interval: Duration::from_millis(SSL_RATE_INTERVAL_MS),
            upstream_timeout: Duration::from_secs(UPSTREAM_TIMEOUT_SECS),
            scrape_timeout: Duration::from_secs(SCRAPE_TIMEOUT_SECS),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Checks the invariants every later stage relies on.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for empty credentials, an empty domain list, a
    /// zero limiter interval or a metrics path that cannot be routed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.credentials.apikey.is_empty() {
            return Err(ConfigError::MissingCredential(crate::config::APIKEY_ENV));
        }
        if self.credentials.secret.is_empty() {
            return Err(ConfigError::MissingCredential(crate::config::SECRET_ENV));
        }
        if self.domains.is_empty() {
            return Err(ConfigError::EmptyDomainList);
        }
        if self.dns_interval.is_zero() {
            return Err(ConfigError::InvalidInterval("dns"));
        }
        if self.ssl_interval.is_zero() {
            return Err(ConfigError::InvalidInterval("ssl"));
        }
        if !self.metrics_path.starts_with('/')
            || self.metrics_path == "/"
            || self.metrics_path == crate::config::HEALTH_PATH
        {
            return Err(ConfigError::InvalidMetricsPath(self.metrics_path.clone()));
        }
        Ok(())
    }
}

/// Splits the `--domains` value on commas, dropping blank entries.
pub fn parse_domain_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

impl TryFrom<Opt> for Config {
    type Error = ConfigError;

    fn try_from(opt: Opt) -> Result<Self, Self::Error> {
        let credentials = Credentials {
            apikey: opt.apikey.unwrap_or_default(),
            secret: opt.secret.unwrap_or_default(),
        };

        let config = Config {
            credentials,
            domains: parse_domain_list(&opt.domains),
            endpoint: opt.endpoint,
            metrics_path: opt.path,
            record_granularity: opt.record_granularity,
            dns_interval: Duration::from_millis(opt.dns_interval_ms),
            ssl_interval: Duration::from_millis(opt.ssl_interval_ms),
            upstream_timeout: Duration::from_secs(opt.timeout_seconds),
            scrape_timeout: Duration::from_secs(opt.scrape_timeout_seconds),
            api_base_url: opt.api_base_url,
        };
        config.validate()?;
        Ok(config)
    }
}
