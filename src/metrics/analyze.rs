use std::time::Duration;

use super::types::{Sample, Summary};

/// Number of quantile groups used for the p95 boundary.
const QUANTILE_GROUPS: u128 = 20;
/// 1-based index of the boundary reported as p95 (the 19th of 20 groups).
const P95_BOUNDARY: u128 = 19;
/// p95 is only reported when strictly more successes than this are present.
const P95_MIN_SUCCESSES: usize = 20;

/// Reduce a finished run's samples to a [`Summary`].
///
/// Successful means status `200`; every other status, including the
/// request-error status `0`, counts as failed. Latency statistics cover
/// successful samples only, while the run duration spans the completion
/// timestamps of all samples.
#[must_use]
pub fn analyze_results(samples: &[Sample], test_name: &str) -> Summary {
    if samples.is_empty() {
        return Summary::empty(test_name);
    }

    let mut latencies: Vec<Duration> = samples
        .iter()
        .filter(|sample| sample.is_success())
        .map(Sample::response_time)
        .collect();
    latencies.sort_unstable();

    let total_requests = u64::try_from(samples.len()).unwrap_or(u64::MAX);
    let successful_requests = u64::try_from(latencies.len()).unwrap_or(u64::MAX);
    let failed_requests = total_requests.saturating_sub(successful_requests);
    let duration = run_duration(samples);

    Summary {
        test_name: test_name.to_owned(),
        duration,
        total_requests,
        successful_requests,
        failed_requests,
        avg_response_time: mean(&latencies),
        min_response_time: latencies.first().copied().unwrap_or(Duration::ZERO),
        max_response_time: latencies.last().copied().unwrap_or(Duration::ZERO),
        p95_response_time: p95(&latencies),
        requests_per_second: requests_per_second(total_requests, duration),
    }
}

fn run_duration(samples: &[Sample]) -> Duration {
    let first = samples.iter().map(Sample::timestamp).min();
    let last = samples.iter().map(Sample::timestamp).max();
    match (first, last) {
        (Some(start), Some(end)) => end
            .signed_duration_since(start)
            .to_std()
            .unwrap_or(Duration::ZERO),
        (None, _) | (_, None) => Duration::ZERO,
    }
}

fn mean(latencies: &[Duration]) -> Duration {
    let count = u128::try_from(latencies.len()).unwrap_or(u128::MAX);
    let total_ns = latencies
        .iter()
        .fold(0u128, |acc, latency| acc.saturating_add(latency.as_nanos()));
    total_ns
        .checked_div(count)
        .map_or(Duration::ZERO, duration_from_nanos)
}

/// 19th of 20 cut points using the exclusive quantile method, interpolating
/// linearly between the two neighbouring order statistics. Expects sorted
/// input.
fn p95(sorted: &[Duration]) -> Duration {
    if sorted.len() <= P95_MIN_SUCCESSES {
        return Duration::ZERO;
    }
    let points = u128::try_from(sorted.len())
        .unwrap_or(u128::MAX)
        .saturating_add(1);
    let scaled = P95_BOUNDARY.saturating_mul(points);
    let rank = scaled.checked_div(QUANTILE_GROUPS).unwrap_or(0);
    let delta = scaled.checked_rem(QUANTILE_GROUPS).unwrap_or(0);

    let upper_idx = usize::try_from(rank).unwrap_or(usize::MAX);
    let lower_idx = upper_idx.saturating_sub(1);
    let (Some(lower), Some(upper)) = (sorted.get(lower_idx), sorted.get(upper_idx)) else {
        return sorted.last().copied().unwrap_or(Duration::ZERO);
    };

    let weighted = lower
        .as_nanos()
        .saturating_mul(QUANTILE_GROUPS.saturating_sub(delta))
        .saturating_add(upper.as_nanos().saturating_mul(delta));
    weighted
        .checked_div(QUANTILE_GROUPS)
        .map_or(Duration::ZERO, duration_from_nanos)
}

#[expect(
    clippy::float_arithmetic,
    reason = "throughput is reported as fractional requests per second"
)]
fn requests_per_second(total_requests: u64, duration: Duration) -> f64 {
    let secs = duration.as_secs_f64();
    if secs > 0.0 {
        total_requests as f64 / secs
    } else {
        0.0
    }
}

fn duration_from_nanos(nanos: u128) -> Duration {
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
