//! DNS record collector.
//!
//! For each domain, counts the records Porkbun returns by type (and optionally
//! by name) and publishes one gauge per distinct key.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::fanout::{fan_out, gated_call};
use super::{build_fq_name, Collector, MetricDescriptor, Observation, ObservationSink, ScrapeContext};
use crate::config::{RecordGranularity, METRIC_NAMESPACE};
use crate::error_handling::{update_error_stats, Operation};
use crate::porkbun::{DnsRecord, RegistrarApi};
use crate::rate_limiter::RateLimiter;

const DNS_TYPE_HELP: &str = "A metric that totals a domain's DNS record types";

/// Record counts of one domain, keyed by type and then by name.
///
/// With `RecordGranularity::Type` the name level holds a single empty key.
/// The record value is never part of the key: it can be large and is not a
/// useful label.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RecordAggregate {
    counts: HashMap<String, HashMap<String, u16>>,
}

impl RecordAggregate {
    pub fn from_records(records: &[DnsRecord], granularity: RecordGranularity) -> Self {
        let mut counts: HashMap<String, HashMap<String, u16>> = HashMap::new();
        for record in records {
            let name = match granularity {
                RecordGranularity::TypeAndName => record.name.clone(),
                RecordGranularity::Type => String::new(),
            };
            let count = counts
                .entry(record.record_type.clone())
                .or_default()
                .entry(name)
                .or_insert(0);
            *count = count.saturating_add(1);
        }
        RecordAggregate { counts }
    }

    /// Number of distinct record types.
    pub fn type_count(&self) -> usize {
        self.counts.len()
    }

    /// Number of distinct leaf keys, i.e. observations this aggregate yields.
    pub fn len(&self) -> usize {
        self.counts.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Flattens into one observation per leaf key.
    pub fn into_observations(
        self,
        metric: &str,
        domain: &str,
        granularity: RecordGranularity,
    ) -> Vec<Observation> {
        let mut observations = Vec::with_capacity(self.len());
        for (record_type, by_name) in self.counts {
            for (name, count) in by_name {
                let label_values = match granularity {
                    RecordGranularity::TypeAndName => {
                        vec![domain.to_string(), record_type.clone(), name]
                    }
                    RecordGranularity::Type => vec![domain.to_string(), record_type.clone()],
                };
                observations.push(Observation::new(metric, f64::from(count), label_values));
            }
        }
        observations
    }
}

/// Publishes `porkbun_dns_type` for every configured domain.
pub struct DomainCollector {
    client: Arc<dyn RegistrarApi>,
    limiter: Arc<RateLimiter>,
    domains: Vec<String>,
    granularity: RecordGranularity,
    descriptor: MetricDescriptor,
}

impl DomainCollector {
    pub fn new(
        client: Arc<dyn RegistrarApi>,
        limiter: Arc<RateLimiter>,
        domains: Vec<String>,
        granularity: RecordGranularity,
    ) -> Self {
        let label_names: &[&'static str] = match granularity {
            RecordGranularity::TypeAndName => &["domain", "type", "name"],
            RecordGranularity::Type => &["domain", "type"],
        };
        DomainCollector {
            client,
            limiter,
            domains,
            granularity,
            descriptor: MetricDescriptor::new(
                build_fq_name(METRIC_NAMESPACE, "", "dns_type"),
                DNS_TYPE_HELP,
                label_names,
            ),
        }
    }
}

#[async_trait]
impl Collector for DomainCollector {
    fn name(&self) -> &'static str {
        "DomainCollector"
    }

    fn describe(&self) -> Vec<MetricDescriptor> {
        vec![self.descriptor.clone()]
    }

    async fn collect(&self, ctx: &ScrapeContext, sink: &ObservationSink) {
        let spawned = fan_out(&self.domains, ctx, |domain| {
            let client = Arc::clone(&self.client);
            let limiter = Arc::clone(&self.limiter);
            let ctx = ctx.clone();
            let sink = sink.clone();
            let metric = self.descriptor.name.clone();
            let granularity = self.granularity;

            async move {
                let records = match gated_call(
                    &limiter,
                    &ctx,
                    &domain,
                    Operation::RetrieveRecords,
                    client.fetch_records(&domain),
                )
                .await
                {
                    Ok(records) => records,
                    Err(e) => {
                        update_error_stats(&ctx.stats, &e);
                        return;
                    }
                };
                ctx.stats.increment_success();

                let aggregate = RecordAggregate::from_records(&records, granularity);
                log::debug!(
                    "[DomainCollector] Domain ({}): {} records across {} types",
                    domain,
                    records.len(),
                    aggregate.type_count()
                );
                sink.emit_all(aggregate.into_observations(&metric, &domain, granularity));
            }
        })
        .await;

        log::debug!("[DomainCollector] Finished {} domain tasks", spawned);
    }
}
