//! Error categorization.
//!
//! Maps per-domain collection failures onto the `ErrorType` counters.

use super::stats::ProcessingStats;
use super::types::{CollectionError, ErrorType, UpstreamError};

/// Categorizes an `UpstreamError` into an `ErrorType`.
pub fn categorize_upstream_error(error: &UpstreamError) -> ErrorType {
    match error {
        UpstreamError::Api { .. } => ErrorType::UpstreamApiError,
        UpstreamError::Unavailable { .. } => ErrorType::UpstreamUnavailable,
        UpstreamError::Transport(_) => ErrorType::UpstreamTransportError,
        UpstreamError::Decode(_) => ErrorType::UpstreamDecodeError,
    }
}

/// Categorizes a `CollectionError` into an `ErrorType`.
pub fn categorize_collection_error(error: &CollectionError) -> ErrorType {
    match error {
        CollectionError::RateLimitCancelled { .. } => ErrorType::RateLimitCancelled,
        CollectionError::ScrapeCancelled { .. } => ErrorType::ScrapeCancelled,
        CollectionError::UpstreamFetchFailed { source, .. } => categorize_upstream_error(source),
    }
}

/// Logs a contained per-domain failure and counts it.
pub fn update_error_stats(stats: &ProcessingStats, error: &CollectionError) {
    let error_type = categorize_collection_error(error);
    stats.increment_error(error_type);
    log::warn!("{} [{}]", error, error_type.as_str());
}
