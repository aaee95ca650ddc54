//! Error type definitions.
//!
//! This module defines the startup errors, the per-domain collection errors and
//! the error categories tracked during a scrape.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Invalid startup configuration.
///
/// This is the only error class that aborts the process. It is raised while
/// building `Config`, never during a scrape.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Expected environment to contain '{0}' variable")]
    MissingCredential(&'static str),

    #[error("Need at least one domain")]
    EmptyDomainList,

    #[error("The {0} rate limiter interval must be greater than zero")]
    InvalidInterval(&'static str),

    #[error("Metrics path '{0}' must start with '/' and cannot be '/' or '/healthz'")]
    InvalidMetricsPath(String),
}

/// A rate limiter wait was abandoned because the scrape was cancelled.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Wait on Porkbun API canceled")]
pub struct RateLimitCancelled;

/// Failure of a single Porkbun API call.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Porkbun answered with its JSON error envelope, e.g. "The SSL certificate
    /// is not ready for this domain."
    #[error("status: {status} message: {message}")]
    Api { status: u16, message: String },

    /// The body was not JSON at all. Porkbun serves an HTML page when it is
    /// overloaded (503 Service Temporarily Unavailable).
    #[error("status: {status} Porkbun service unavailable: {body}")]
    Unavailable { status: u16, body: String },

    /// The request never produced a response (connect error, timeout, ...).
    #[error("request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// A success envelope that lacks the expected payload.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Porkbun API operation a collector performs per domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    RetrieveRecords,
    RetrieveSslBundle,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::RetrieveRecords => "retrieve records",
            Operation::RetrieveSslBundle => "retrieve SSL bundle",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-domain collection failure.
///
/// Always contained at the task boundary: the domain contributes no
/// observations and the rest of the scrape carries on.
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("Unable to {operation} for domain ({domain}): {source}")]
    RateLimitCancelled {
        domain: String,
        operation: Operation,
        source: RateLimitCancelled,
    },

    #[error("Unable to {operation} for domain ({domain}): {source}")]
    UpstreamFetchFailed {
        domain: String,
        operation: Operation,
        source: UpstreamError,
    },

    #[error("Unable to {operation} for domain ({domain}): scrape deadline exceeded")]
    ScrapeCancelled { domain: String, operation: Operation },
}

/// Categories of failures tracked during a scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    RateLimitCancelled,
    ScrapeCancelled,
    // Upstream errors
    UpstreamApiError,
    UpstreamUnavailable,
    UpstreamTransportError,
    UpstreamDecodeError,
    TaskPanicked,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::RateLimitCancelled => "Rate limiter wait canceled",
            ErrorType::ScrapeCancelled => "Scrape deadline exceeded",
            ErrorType::UpstreamApiError => "Porkbun API error",
            ErrorType::UpstreamUnavailable => "Porkbun unavailable",
            ErrorType::UpstreamTransportError => "Porkbun request error",
            ErrorType::UpstreamDecodeError => "Porkbun response decode error",
            ErrorType::TaskPanicked => "Collection task panicked",
        }
    }
}
