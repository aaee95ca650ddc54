//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions and categorization
//! - Per-scrape failure statistics
//!
//! Only `ConfigError` is fatal. Every other error is contained to the domain it
//! happened for and shows up as missing observations plus a log line.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    categorize_collection_error, categorize_upstream_error, update_error_stats,
};
pub use stats::ProcessingStats;
pub use types::{
    CollectionError, ConfigError, ErrorType, InitializationError, Operation, RateLimitCancelled,
    UpstreamError,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        assert_eq!(stats.successes(), 0);
        assert!(stats.error_summary().is_empty());
    }

    #[test]
    fn test_processing_stats_totals() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::UpstreamApiError);
        stats.increment_error(ErrorType::UpstreamApiError);
        stats.increment_error(ErrorType::RateLimitCancelled);
        stats.increment_success();

        assert_eq!(stats.get_error_count(ErrorType::UpstreamApiError), 2);
        assert_eq!(stats.total_errors(), 3);
        assert_eq!(stats.successes(), 1);
        assert_eq!(
            stats.error_summary(),
            vec![
                (ErrorType::RateLimitCancelled, 1),
                (ErrorType::UpstreamApiError, 2)
            ]
        );
    }

    #[test]
    fn test_categorize_upstream_errors() {
        let not_ready = UpstreamError::Api {
            status: 400,
            message: "The SSL certificate is not ready for this domain.".to_string(),
        };
        let overloaded = UpstreamError::Unavailable {
            status: 503,
            body: "<html>".to_string(),
        };
        assert_eq!(
            categorize_upstream_error(&not_ready),
            ErrorType::UpstreamApiError
        );
        assert_eq!(
            categorize_upstream_error(&overloaded),
            ErrorType::UpstreamUnavailable
        );
        assert_eq!(
            categorize_upstream_error(&UpstreamError::Decode("no records".into())),
            ErrorType::UpstreamDecodeError
        );
    }

    #[test]
    fn test_update_error_stats_counts_by_category() {
        let stats = ProcessingStats::new();
        update_error_stats(
            &stats,
            &CollectionError::RateLimitCancelled {
                domain: "a.com".into(),
                operation: Operation::RetrieveRecords,
                source: RateLimitCancelled,
            },
        );
        update_error_stats(
            &stats,
            &CollectionError::ScrapeCancelled {
                domain: "b.com".into(),
                operation: Operation::RetrieveSslBundle,
            },
        );
        assert_eq!(stats.get_error_count(ErrorType::RateLimitCancelled), 1);
        assert_eq!(stats.get_error_count(ErrorType::ScrapeCancelled), 1);
    }

    #[test]
    fn test_collection_error_message_names_domain_and_operation() {
        let err = CollectionError::UpstreamFetchFailed {
            domain: "b.com".into(),
            operation: Operation::RetrieveRecords,
            source: UpstreamError::Api {
                status: 400,
                message: "Invalid domain.".into(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("retrieve records"));
        assert!(msg.contains("b.com"));
        assert!(msg.contains("Invalid domain."));
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::MissingCredential("APIKEY").to_string(),
            "Expected environment to contain 'APIKEY' variable"
        );
        assert_eq!(
            ConfigError::EmptyDomainList.to_string(),
            "Need at least one domain"
        );
    }
}
