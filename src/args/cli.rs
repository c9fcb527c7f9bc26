use clap::Parser;
use std::time::Duration;

use super::defaults::DEFAULT_ENDPOINT;
use super::parsers::{parse_duration_arg, parse_positive_u64, parse_positive_usize};
use super::types::{PositiveU64, PositiveUsize, TestType};

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "hpa-load",
    version,
    about = "HTTP load generator for exercising autoscaled endpoints with burst, sustained and ramp-up traffic."
)]
pub struct LoadArgs {
    /// Base URL of the application under test (trailing slashes are stripped)
    #[arg(long, short)]
    pub url: Option<String>,

    /// Load pattern to run
    #[arg(long = "test-type", short = 't', default_value = "burst", ignore_case = true)]
    pub test_type: TestType,

    /// Number of requests to send (burst)
    #[arg(
        long,
        short = 'n',
        default_value = "100",
        value_parser = parse_positive_u64
    )]
    pub requests: PositiveU64,

    /// Maximum number of requests in flight (burst)
    #[arg(
        long,
        short = 'c',
        default_value = "10",
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// Test duration in seconds (sustained/ramp)
    #[arg(
        long,
        short = 'd',
        default_value = "60",
        value_parser = parse_positive_u64
    )]
    pub duration: PositiveU64,

    /// Target requests per second; the final stage rate for ramp (sustained/ramp)
    #[arg(long, short = 'r', default_value = "10", value_parser = parse_positive_u64)]
    pub rps: PositiveU64,

    /// Number of ramp stages (ramp)
    #[arg(long, short = 's', default_value = "10", value_parser = parse_positive_u64)]
    pub steps: PositiveU64,

    /// Path and query appended to the base URL
    #[arg(long, short = 'e', default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Write the summary and every sample to this JSON file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Per-request timeout, including the response body (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = "30s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Enable verbose logging (sets log level to info unless overridden by HPA_LOAD_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Path to config file (TOML/JSON). Defaults to ./hpa-load.toml or ./hpa-load.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
