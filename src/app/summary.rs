use std::path::Path;
use std::time::Duration;

use crate::load::LoadPattern;
use crate::metrics::Summary;

use super::RunConfig;

const NANOS_PER_CENTI_MILLI: u128 = 10_000;
const MILLIS_PER_CENTI_SEC: u128 = 10;

pub(crate) fn parameter_lines(config: &RunConfig) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Starting {} load test",
            config.pattern.test_type().as_str()
        ),
        format!("  URL: {}", config.base_url),
        format!("  Endpoint: {}", config.endpoint),
    ];

    match config.pattern {
        LoadPattern::Burst {
            requests,
            concurrency,
        } => {
            lines.push(format!("  Requests: {}", requests));
            lines.push(format!("  Concurrency: {}", concurrency));
        }
        LoadPattern::Sustained { duration, rps } => {
            lines.push(format!("  Duration: {}s", duration.as_secs()));
            lines.push(format!("  RPS: {}", rps));
        }
        LoadPattern::Ramp {
            duration,
            max_rps,
            steps,
        } => {
            lines.push(format!("  Duration: {}s", duration.as_secs()));
            lines.push(format!("  Max RPS: {}", max_rps));
            lines.push(format!("  Steps: {}", steps));
        }
    }

    lines
}

pub(crate) fn result_lines(summary: &Summary, elapsed: Duration) -> Vec<String> {
    let success_rate_x100 = success_rate_x100(summary);
    vec![
        String::new(),
        "Results:".to_owned(),
        format!("  Total time: {}s", format_secs(elapsed)),
        format!("  Total requests: {}", summary.total_requests),
        format!("  Successful requests: {}", summary.successful_requests),
        format!("  Failed requests: {}", summary.failed_requests),
        format!(
            "  Success rate: {}.{:02}%",
            success_rate_x100 / 100,
            success_rate_x100 % 100
        ),
        format!(
            "  Avg response time: {}ms",
            format_millis(summary.avg_response_time)
        ),
        format!(
            "  Min/Max response time: {}ms / {}ms",
            format_millis(summary.min_response_time),
            format_millis(summary.max_response_time)
        ),
        format!("  P95: {}ms", format_millis(summary.p95_response_time)),
        format!("  Effective RPS: {:.2}", summary.requests_per_second),
    ]
}

pub(crate) fn saved_line(path: &Path) -> String {
    format!("  Results saved to: {}", path.display())
}

pub(crate) fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Success percentage scaled by 100 and rounded half up; an empty run
/// reports zero.
fn success_rate_x100(summary: &Summary) -> u64 {
    if summary.total_requests == 0 {
        return 0;
    }
    let total = u128::from(summary.total_requests);
    let scaled = u128::from(summary.successful_requests)
        .saturating_mul(10_000)
        .saturating_add(total.checked_div(2).unwrap_or(0))
        .checked_div(total)
        .unwrap_or(0);
    u64::try_from(scaled).map_or(u64::MAX, |value| value)
}

/// Milliseconds rounded to two decimals.
fn format_millis(value: Duration) -> String {
    let centis = value
        .as_nanos()
        .saturating_add(NANOS_PER_CENTI_MILLI / 2)
        .checked_div(NANOS_PER_CENTI_MILLI)
        .unwrap_or(0);
    format_centis(centis)
}

/// Seconds rounded to two decimals.
fn format_secs(value: Duration) -> String {
    let centis = value
        .as_millis()
        .saturating_add(MILLIS_PER_CENTI_SEC / 2)
        .checked_div(MILLIS_PER_CENTI_SEC)
        .unwrap_or(0);
    format_centis(centis)
}

fn format_centis(centis: u128) -> String {
    format!(
        "{}.{:02}",
        centis.checked_div(100).unwrap_or(0),
        centis.checked_rem(100).unwrap_or(0)
    )
}
