use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::http::RequestExecutor;
use crate::metrics::Sample;
use crate::shutdown::{ShutdownSender, wait_for_shutdown};

/// Schedule `requests` requests at once while admitting at most
/// `concurrency` of them at a time.
///
/// Every admitted request runs to completion; a shutdown only stops requests
/// still waiting for admission. Sample order is not significant.
pub async fn burst_load<E>(
    executor: &E,
    endpoint: &str,
    requests: u64,
    concurrency: usize,
    shutdown_tx: &ShutdownSender,
) -> Vec<Sample>
where
    E: RequestExecutor + ?Sized,
{
    info!(
        "Burst: {} requests with concurrency {}",
        requests, concurrency
    );
    let semaphore = Semaphore::new(concurrency.clamp(1, Semaphore::MAX_PERMITS));

    let pending = (0..requests).map(|_| {
        let mut shutdown_rx = shutdown_tx.subscribe();
        let semaphore = &semaphore;
        async move {
            let permit = tokio::select! {
                biased;
                () = wait_for_shutdown(&mut shutdown_rx) => return None,
                permit = semaphore.acquire() => permit.ok()?,
            };
            let sample = executor.execute(endpoint).await;
            drop(permit);
            Some(sample)
        }
    });

    let samples: Vec<Sample> = join_all(pending).await.into_iter().flatten().collect();
    let completed = u64::try_from(samples.len()).unwrap_or(u64::MAX);
    if completed < requests {
        warn!(
            "Burst interrupted: {} of {} requests were sent",
            completed, requests
        );
    }
    samples
}
