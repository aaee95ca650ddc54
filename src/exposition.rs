//! Prometheus text exposition of a scrape.

use std::collections::HashMap;

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

use crate::collector::{MetricDescriptor, Observation};

/// Renders observations in the Prometheus text format.
///
/// A fresh `Registry` is built for every scrape, so series of domains that
/// failed this time never linger from an earlier scrape. Observations whose
/// metric was not described, or whose label count does not match the
/// descriptor, are logged and dropped.
pub fn encode(
    descriptors: &[MetricDescriptor],
    observations: &[Observation],
) -> Result<String, prometheus::Error> {
    let registry = Registry::new();
    let mut families: HashMap<&str, GaugeVec> = HashMap::with_capacity(descriptors.len());

    for descriptor in descriptors {
        let gauge = GaugeVec::new(
            Opts::new(descriptor.name.as_str(), descriptor.help),
            &descriptor.label_names,
        )?;
        registry.register(Box::new(gauge.clone()))?;
        families.insert(descriptor.name.as_str(), gauge);
    }

    for observation in observations {
        let Some(gauge) = families.get(observation.metric.as_str()) else {
            log::warn!("Skipping observation of undescribed metric {}", observation.metric);
            continue;
        };
        let label_values: Vec<&str> = observation.label_values.iter().map(String::as_str).collect();
        match gauge.get_metric_with_label_values(&label_values) {
            Ok(series) => series.set(observation.value),
            Err(e) => log::warn!("Skipping observation of {}: {}", observation.metric, e),
        }
    }

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
