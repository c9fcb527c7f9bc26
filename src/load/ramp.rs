use std::time::Duration;

use tracing::{info, warn};

use crate::http::RequestExecutor;
use crate::metrics::Sample;
use crate::shutdown::ShutdownSender;

use super::sustained::run_paced;

/// One stage of a ramp: a sustained run at `target_rps` for `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampStage {
    /// 1-based stage number.
    pub step: u64,
    pub duration: Duration,
    pub target_rps: u64,
}

/// Split `duration` into `steps` equal stages whose rates climb linearly to
/// `max_rps`.
///
/// Stage length is `duration / steps` in whole seconds and stage `k` runs at
/// `k * max_rps / steps`, both rounded down, so a duration that does not divide
/// evenly leaves an uncovered tail and early stages may run at zero. Stages
/// are produced lazily.
pub fn ramp_stages(
    duration: Duration,
    max_rps: u64,
    steps: u64,
) -> impl Iterator<Item = RampStage> {
    let stage_secs = duration.as_secs().checked_div(steps).unwrap_or(0);
    (1..=steps)
        .map(move |step| {
            let target = u128::from(step)
                .saturating_mul(u128::from(max_rps))
                .checked_div(u128::from(steps))
                .unwrap_or(0);
            RampStage {
                step,
                duration: Duration::from_secs(stage_secs),
                target_rps: u64::try_from(target).unwrap_or(u64::MAX),
            }
        })
}

/// Run every stage of [`ramp_stages`] in order and concatenate their samples.
pub async fn ramp_load<E>(
    executor: &E,
    endpoint: &str,
    duration: Duration,
    max_rps: u64,
    steps: u64,
    shutdown_tx: &ShutdownSender,
) -> Vec<Sample>
where
    E: RequestExecutor + ?Sized,
{
    let mut shutdown_rx = shutdown_tx.subscribe();
    let mut samples = Vec::new();

    for stage in ramp_stages(duration, max_rps, steps) {
        info!(
            "Step {}/{}: {} RPS for {}s",
            stage.step,
            steps,
            stage.target_rps,
            stage.duration.as_secs()
        );
        let run = run_paced(
            executor,
            endpoint,
            stage.duration,
            stage.target_rps,
            &mut shutdown_rx,
        )
        .await;
        samples.extend(run.samples);
        if run.interrupted {
            warn!("Ramp interrupted during step {}/{}", stage.step, steps);
            break;
        }
    }

    samples
}
