//! SSL bundle collector.

use std::sync::Arc;

use async_trait::async_trait;

use super::fanout::{fan_out, gated_call};
use super::{build_fq_name, Collector, MetricDescriptor, Observation, ObservationSink, ScrapeContext};
use crate::config::METRIC_NAMESPACE;
use crate::error_handling::{update_error_stats, Operation};
use crate::porkbun::RegistrarApi;
use crate::rate_limiter::RateLimiter;

const SSL_BUNDLE_HELP: &str = "A metric with a constant value of 1 if bundle exists";

/// Publishes `porkbun_ssl_bundle{domain} 1` for every domain whose SSL bundle
/// Porkbun returns.
///
/// A missing series is the negative signal. "Certificate not ready" and an
/// overloaded upstream both leave the domain out; they differ only in the
/// logs and in the scrape's `ProcessingStats`.
///
/// The limiter passed in must be dedicated to the `/ssl` endpoint, which
/// starts answering 503 at the 1 qps the rest of the API tolerates.
pub struct SslCollector {
    client: Arc<dyn RegistrarApi>,
    limiter: Arc<RateLimiter>,
    domains: Vec<String>,
    descriptor: MetricDescriptor,
}

impl SslCollector {
    pub fn new(
        client: Arc<dyn RegistrarApi>,
        limiter: Arc<RateLimiter>,
        domains: Vec<String>,
    ) -> Self {
        SslCollector {
            client,
            limiter,
            domains,
            descriptor: MetricDescriptor::new(
                build_fq_name(METRIC_NAMESPACE, "", "ssl_bundle"),
                SSL_BUNDLE_HELP,
                &["domain"],
            ),
        }
    }
}

#[async_trait]
impl Collector for SslCollector {
    fn name(&self) -> &'static str {
        "SslCollector"
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

            async move {
                log::debug!("[SslCollector] Domain: {}", domain);

                match gated_call(
                    &limiter,
                    &ctx,
                    &domain,
                    Operation::RetrieveSslBundle,
                    client.probe_certificate_bundle(&domain),
                )
                .await
                {
                    Ok(_bundle) => {
                        ctx.stats.increment_success();
                        log::debug!("[SslCollector] Domain ({}) contains SSL record", domain);
                        sink.emit(Observation::new(metric, 1.0, vec![domain]));
                    }
                    Err(e) => update_error_stats(&ctx.stats, &e),
                }
            }
        })
        .await;

        log::debug!("[SslCollector] Finished {} domain tasks", spawned);
    }
}
