//! Per-domain fan-out shared by the Porkbun collectors.

use std::future::Future;

use tokio::task::JoinSet;

use super::ScrapeContext;
use crate::error_handling::{CollectionError, ErrorType, Operation, UpstreamError};
use crate::rate_limiter::RateLimiter;

/// Spawns one task per domain and waits for all of them.
///
/// A panicking task is logged and counted; it never fails the scrape. If the
/// returned future is dropped, every task still running is aborted.
/// Returns the number of tasks spawned.
pub(crate) async fn fan_out<F, Fut>(domains: &[String], ctx: &ScrapeContext, task: F) -> usize
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mut tasks = JoinSet::new();
    for domain in domains {
        tasks.spawn(task(domain.clone()));
    }
    let spawned = tasks.len();

    while let Some(task_result) = tasks.join_next().await {
        if let Err(join_error) = task_result {
            ctx.stats.increment_error(ErrorType::TaskPanicked);
            log::warn!("Task panicked: {:?}", join_error);
        }
    }

    spawned
}

/// Waits on `limiter`, then runs `call`, giving up on either step as soon as
/// the scrape is cancelled.
pub(crate) async fn gated_call<T, Fut>(
    limiter: &RateLimiter,
    ctx: &ScrapeContext,
    domain: &str,
    operation: Operation,
    call: Fut,
) -> Result<T, CollectionError>
where
    Fut: Future<Output = Result<T, UpstreamError>>,
{
    limiter
        .acquire(&ctx.cancel)
        .await
        .map_err(|source| CollectionError::RateLimitCancelled {
            domain: domain.to_string(),
            operation,
            source,
        })?;

    tokio::select! {
        biased;
        _ = ctx.cancel.cancelled() => Err(CollectionError::ScrapeCancelled {
            domain: domain.to_string(),
            operation,
        }),
        result = call => result.map_err(|source| CollectionError::UpstreamFetchFailed {
            domain: domain.to_string(),
            operation,
            source,
        }),
    }
}
