use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{info, warn};

use crate::http::RequestExecutor;
use crate::metrics::Sample;
use crate::shutdown::{ShutdownReceiver, ShutdownSender, shutdown_requested, wait_for_shutdown};

const NANOS_PER_SEC: u64 = 1_000_000_000;

pub(super) struct PacedRun {
    pub(super) samples: Vec<Sample>,
    pub(super) interrupted: bool,
}

/// Send requests one after another at roughly `rps` per second until
/// `duration` has elapsed.
///
/// After each request the driver sleeps for whatever is left of the
/// `1 / rps` interval. Requests slower than the interval are not compensated
/// for, so the achieved rate drops below `rps` once latency exceeds it.
pub async fn sustained_load<E>(
    executor: &E,
    endpoint: &str,
    duration: Duration,
    rps: u64,
    shutdown_tx: &ShutdownSender,
) -> Vec<Sample>
where
    E: RequestExecutor + ?Sized,
{
    info!("Sustained: {} RPS for {}s", rps, duration.as_secs());
    let mut shutdown_rx = shutdown_tx.subscribe();
    let run = run_paced(executor, endpoint, duration, rps, &mut shutdown_rx).await;
    if run.interrupted {
        warn!(
            "Sustained run interrupted after {} requests",
            run.samples.len()
        );
    }
    run.samples
}

pub(super) async fn run_paced<E>(
    executor: &E,
    endpoint: &str,
    duration: Duration,
    rps: u64,
    shutdown_rx: &mut ShutdownReceiver,
) -> PacedRun
where
    E: RequestExecutor + ?Sized,
{
    let start = Instant::now();
    let deadline = start.checked_add(duration);
    let mut samples = Vec::new();

    let Some(interval) = request_interval(rps) else {
        // Zero rate: hold the slot for its duration without sending anything.
        let interrupted = match deadline {
            Some(deadline) => tokio::select! {
                () = tokio::time::sleep_until(deadline) => false,
                () = wait_for_shutdown(shutdown_rx) => true,
            },
            None => {
                wait_for_shutdown(shutdown_rx).await;
                true
            }
        };
        return PacedRun {
            samples,
            interrupted,
        };
    };

    while deadline.is_none_or(|deadline| Instant::now() < deadline) {
        if shutdown_requested(shutdown_rx) {
            return PacedRun {
                samples,
                interrupted: true,
            };
        }

        let request_start = Instant::now();
        samples.push(executor.execute(endpoint).await);

        let pause = interval.saturating_sub(request_start.elapsed());
        if !pause.is_zero() {
            tokio::select! {
                () = sleep(pause) => {}
                () = wait_for_shutdown(shutdown_rx) => {
                    return PacedRun {
                        samples,
                        interrupted: true,
                    };
                }
            }
        }
    }

    PacedRun {
        samples,
        interrupted: false,
    }
}

/// Gap between request starts for `rps`, or `None` when nothing should be
/// sent.
pub(super) fn request_interval(rps: u64) -> Option<Duration> {
    if rps == 0 {
        return None;
    }
    NANOS_PER_SEC.checked_div(rps).map(Duration::from_nanos)
}
