//! Load pattern drivers: burst, sustained and ramp-up traffic.
mod burst;
mod ramp;
mod sustained;


use std::time::Duration;

use crate::args::TestType;
use crate::http::RequestExecutor;
use crate::metrics::Sample;
use crate::shutdown::ShutdownSender;

pub use burst::burst_load;
pub use ramp::{RampStage, ramp_load, ramp_stages};
pub use sustained::sustained_load;

/// Idle connections kept per unit of concurrency or target rate.
const POOL_PER_SLOT: usize = 2;

/// A fully resolved traffic shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPattern {
    /// `requests` scheduled at once, at most `concurrency` in flight.
    Burst { requests: u64, concurrency: usize },
    /// Sequential requests paced to `rps` until `duration` has elapsed.
    Sustained { duration: Duration, rps: u64 },
    /// `steps` sustained stages with rates rising to `max_rps`.
    Ramp {
        duration: Duration,
        max_rps: u64,
        steps: u64,
    },
}

impl LoadPattern {
    #[must_use]
    pub const fn test_type(&self) -> TestType {
        match self {
            LoadPattern::Burst { .. } => TestType::Burst,
            LoadPattern::Sustained { .. } => TestType::Sustained,
            LoadPattern::Ramp { .. } => TestType::Ramp,
        }
    }

    /// Connection pool size for the run: twice the concurrency for bursts,
    /// twice the (peak) target rate otherwise.
    #[must_use]
    pub fn pool_size(&self) -> usize {
        let slots = match *self {
            LoadPattern::Burst { concurrency, .. } => concurrency,
            LoadPattern::Sustained { rps, .. } => usize::try_from(rps).unwrap_or(usize::MAX),
            LoadPattern::Ramp { max_rps, .. } => usize::try_from(max_rps).unwrap_or(usize::MAX),
        };
        slots.saturating_mul(POOL_PER_SLOT)
    }
}

/// Drive `pattern` against `endpoint` and collect every sample.
pub async fn run_pattern<E>(
    executor: &E,
    endpoint: &str,
    pattern: LoadPattern,
    shutdown_tx: &ShutdownSender,
) -> Vec<Sample>
where
    E: RequestExecutor + ?Sized,
{
    match pattern {
        LoadPattern::Burst {
            requests,
            concurrency,
        } => burst_load(executor, endpoint, requests, concurrency, shutdown_tx).await,
        LoadPattern::Sustained { duration, rps } => {
            sustained_load(executor, endpoint, duration, rps, shutdown_tx).await
        }
        LoadPattern::Ramp {
            duration,
            max_rps,
            steps,
        } => ramp_load(executor, endpoint, duration, max_rps, steps, shutdown_tx).await,
    }
}
