//! Status server data structures.

use std::sync::Arc;
use std::time::Duration;

use crate::collector::ScrapeOrchestrator;

/// Shared state for the status server
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ScrapeOrchestrator>,
    pub metrics_path: String,
    /// Upper bound on a scrape; a shorter timeout announced by the scraper wins
    pub scrape_timeout: Duration,
}
