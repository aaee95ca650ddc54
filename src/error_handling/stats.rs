//! Processing statistics tracking.
//!
//! This module provides thread-safe failure counters for a single scrape.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ErrorType;

/// Thread-safe processing statistics tracker.
///
/// Tracks errors by category using atomic counters, allowing concurrent
/// access from every per-domain task. All types are initialized to zero on
/// creation.
///
/// # Thread Safety
///
/// This struct is thread-safe and can be shared across multiple tasks using `Arc`.
pub struct ProcessingStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    successes: AtomicUsize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        ProcessingStats {
            errors,
            successes: AtomicUsize::new(0),
        }
    }

    /// Increment an error counter.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                error
            );
        }
    }

    /// Record a domain task that completed its upstream call.
    pub fn increment_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the count for an error type.
    ///
    /// Returns 0 if the error type is not in the map (should never happen if properly initialized).
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }

    /// Get total error count across all error types.
    pub fn total_errors(&self) -> usize {
        ErrorType::iter().map(|e| self.get_error_count(e)).sum()
    }

    /// Non-zero error counters, in declaration order.
    pub fn error_summary(&self) -> Vec<(ErrorType, usize)> {
        ErrorType::iter()
            .map(|e| (e, self.get_error_count(e)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
