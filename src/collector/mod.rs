//! Metric collectors.
//!
//! Every metric family the exporter serves comes from a `Collector`. A
//! collector declares its descriptors up front (`describe`) and, once per
//! scrape, pushes observations into an `ObservationSink` (`collect`). The
//! `ScrapeOrchestrator` composes the collectors and owns the scrape barrier.

mod domain;
mod exporter;
mod fanout;
mod orchestrator;
mod ssl;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error_handling::ProcessingStats;

pub use domain::{DomainCollector, RecordAggregate};
pub use exporter::ExporterCollector;
pub use orchestrator::{ScrapeOrchestrator, ScrapeResult};
pub use ssl::SslCollector;

/// Joins the non-empty parts of a metric name with `_`.
pub fn build_fq_name(namespace: &str, subsystem: &str, name: &str) -> String {
    [namespace, subsystem, name]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
}

/// Static description of a gauge family: name, help text and label schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub name: String,
    pub help: &'static str,
    pub label_names: Vec<&'static str>,
}

impl MetricDescriptor {
    pub fn new(name: String, help: &'static str, label_names: &[&'static str]) -> Self {
        MetricDescriptor {
            name,
            help,
            label_names: label_names.to_vec(),
        }
    }
}

/// A single gauge sample. `label_values` follows the descriptor's label order.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub metric: String,
    pub value: f64,
    pub label_values: Vec<String>,
}

impl Observation {
    pub fn new(metric: impl Into<String>, value: f64, label_values: Vec<String>) -> Self {
        Observation {
            metric: metric.into(),
            value,
            label_values,
        }
    }
}

/// Write end of a scrape's observation stream.
#[derive(Clone)]
pub struct ObservationSink {
    tx: mpsc::UnboundedSender<Observation>,
}

impl ObservationSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Observation>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ObservationSink { tx }, rx)
    }

    pub fn emit(&self, observation: Observation) {
        if let Err(e) = self.tx.send(observation) {
            log::debug!("Dropping observation for {}: scrape already finished", e.0.metric);
        }
    }

    pub fn emit_all(&self, observations: impl IntoIterator<Item = Observation>) {
        for observation in observations {
            self.emit(observation);
        }
    }
}

/// Per-scrape state handed to every collector.
#[derive(Clone)]
pub struct ScrapeContext {
    pub cancel: CancellationToken,
    pub stats: Arc<ProcessingStats>,
}

impl ScrapeContext {
    pub fn new(cancel: CancellationToken) -> Self {
        ScrapeContext {
            cancel,
            stats: Arc::new(ProcessingStats::new()),
        }
    }
}

/// A source of metric families.
#[async_trait]
pub trait Collector: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Descriptors this collector may emit. Independent of any data.
    fn describe(&self) -> Vec<MetricDescriptor>;

    /// Runs one collection. Must not return before every task it started has
    /// finished emitting.
    async fn collect(&self, ctx: &ScrapeContext, sink: &ObservationSink);
}
