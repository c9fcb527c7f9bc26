use std::path::PathBuf;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, warn};

use crate::args::{LoadArgs, TestType};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{ClientSettings, HttpExecutor, RequestExecutor, build_client, normalize_base_url};
use crate::load::{LoadPattern, run_pattern};
use crate::metrics::{Sample, Summary, analyze_results};
use crate::shutdown::{ShutdownSender, shutdown_channel, shutdown_requested};
use crate::shutdown_handlers::setup_signal_shutdown_handler;

/// Everything needed to execute one run, resolved from the merged CLI and
/// config values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunConfig {
    pub(crate) base_url: String,
    pub(crate) endpoint: String,
    pub(crate) pattern: LoadPattern,
    pub(crate) request_timeout: Duration,
    pub(crate) output: Option<PathBuf>,
}

impl RunConfig {
    pub(crate) fn from_args(args: &LoadArgs) -> AppResult<Self> {
        let raw_url = args
            .url
            .as_deref()
            .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
        let base_url = normalize_base_url(raw_url)?;

        let pattern = match args.test_type {
            TestType::Burst => LoadPattern::Burst {
                requests: args.requests.get(),
                concurrency: args.concurrency.get(),
            },
            TestType::Sustained => LoadPattern::Sustained {
                duration: Duration::from_secs(args.duration.get()),
                rps: args.rps.get(),
            },
            TestType::Ramp => LoadPattern::Ramp {
                duration: Duration::from_secs(args.duration.get()),
                max_rps: args.rps.get(),
                steps: args.steps.get(),
            },
        };

        Ok(Self {
            base_url,
            endpoint: args.endpoint.clone(),
            pattern,
            request_timeout: args.request_timeout,
            output: args.output.as_ref().map(PathBuf::from),
        })
    }
}

pub(crate) struct RunOutcome {
    pub(crate) summary: Summary,
    pub(crate) samples: Vec<Sample>,
    /// Wall-clock time of the whole run, pacing sleeps included.
    pub(crate) elapsed: Duration,
    pub(crate) interrupted: bool,
}

/// Build the client for `config`, drive its pattern until completion or a
/// shutdown signal, and analyze the samples.
pub(crate) async fn run_load(config: &RunConfig) -> AppResult<RunOutcome> {
    let client = build_client(&ClientSettings {
        request_timeout: config.request_timeout,
        pool_size: config.pattern.pool_size(),
    })?;
    let executor = HttpExecutor::new(client, &config.base_url);

    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let outcome = execute_run(&executor, &config.endpoint, config.pattern, &shutdown_tx).await;

    signal_handle.abort();
    Ok(outcome)
}

pub(crate) async fn execute_run<E>(
    executor: &E,
    endpoint: &str,
    pattern: LoadPattern,
    shutdown_tx: &ShutdownSender,
) -> RunOutcome
where
    E: RequestExecutor + ?Sized,
{
    let mut shutdown_rx = shutdown_tx.subscribe();
    let test_name = pattern.test_type().as_str();
    info!("Running {} test against {}", test_name, endpoint);

    let run_start = Instant::now();
    let samples = run_pattern(executor, endpoint, pattern, shutdown_tx).await;
    let elapsed = run_start.elapsed();

    let interrupted = shutdown_requested(&mut shutdown_rx);
    if interrupted {
        warn!(
            "Run interrupted after {} requests; reporting partial results.",
            samples.len()
        );
    }

    let summary = analyze_results(&samples, test_name);
    RunOutcome {
        summary,
        samples,
        elapsed,
        interrupted,
    }
}
