//! Scrape orchestration.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::{Collector, MetricDescriptor, Observation, ObservationSink, ScrapeContext};
use crate::error_handling::ProcessingStats;

/// Outcome of one scrape.
pub struct ScrapeResult {
    pub descriptors: Vec<MetricDescriptor>,
    pub observations: Vec<Observation>,
    pub stats: Arc<ProcessingStats>,
    pub elapsed: Duration,
}

/// Runs every registered collector for each scrape.
///
/// `collect` is a barrier: it returns only after every collector (and so every
/// per-domain task) has finished, and the observations it returns are
/// everything that will ever be emitted for that scrape. Per-domain failures
/// never fail the scrape.
pub struct ScrapeOrchestrator {
    collectors: Vec<Arc<dyn Collector>>,
}

impl ScrapeOrchestrator {
    pub fn new(collectors: Vec<Arc<dyn Collector>>) -> Self {
        ScrapeOrchestrator { collectors }
    }

    /// Descriptors of every collector, in registration order.
    pub fn describe(&self) -> Vec<MetricDescriptor> {
        self.collectors
            .iter()
            .flat_map(|collector| collector.describe())
            .collect()
    }

    /// Runs one scrape. Cancelling `cancel` makes pending domains give up.
    ///
    /// `cancel` is cancelled once the scrape ends, including when the returned
    /// future is dropped part-way; the scrape's per-domain tasks are aborted
    /// then, so an abandoned scrape stops calling the API.
    pub async fn collect(&self, cancel: CancellationToken) -> ScrapeResult {
        let _cancel_on_drop = cancel.clone().drop_guard();
        let start = Instant::now();
        let descriptors = self.describe();
        let ctx = ScrapeContext::new(cancel);
        let (sink, mut rx) = ObservationSink::channel();

        futures::future::join_all(self.collectors.iter().map(|collector| {
            let ctx = &ctx;
            let sink = &sink;
            async move {
                let collector_start = Instant::now();
                collector.collect(ctx, sink).await;
                log::debug!(
                    "{} finished in {:.2}s",
                    collector.name(),
                    collector_start.elapsed().as_secs_f64()
                );
            }
        }))
        .await;
        drop(sink);

        // Every task has been joined, so the channel already holds all
        // observations of this scrape
        let mut observations = Vec::new();
        while let Ok(observation) = rx.try_recv() {
            observations.push(observation);
        }
        drop(rx);

        let elapsed = start.elapsed();
        let stats = ctx.stats;
        log::info!(
            "Scrape completed in {:.2}s: {} observations, {} upstream calls succeeded, {} failed",
            elapsed.as_secs_f64(),
            observations.len(),
            stats.successes(),
            stats.total_errors()
        );
        for (error_type, count) in stats.error_summary() {
            log::info!("   {}: {}", error_type.as_str(), count);
        }

        ScrapeResult {
            descriptors,
            observations,
            stats,
            elapsed,
        }
    }

    /// Runs one scrape that abandons outstanding domains after `deadline`.
    pub async fn collect_with_deadline(&self, deadline: Duration) -> ScrapeResult {
        let cancel = CancellationToken::new();
        let timer = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = tokio::time::sleep(deadline) => {
                        log::warn!(
                            "Scrape deadline of {:.1}s exceeded, abandoning pending domains",
                            deadline.as_secs_f64()
                        );
                        cancel.cancel();
                    }
                }
            })
        };

        let result = self.collect(cancel).await;
        timer.abort();
        result
    }
}
