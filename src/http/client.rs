use std::time::Duration;

use reqwest::Client;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};

/// Per-run client parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    /// Total time allowed for one request, body included.
    pub request_timeout: Duration,
    /// Idle connections kept per host.
    pub pool_size: usize,
}

/// Build the HTTP client shared by every request of a run.
///
/// # Errors
///
/// Returns an error when the underlying TLS backend or resolver cannot be
/// initialised.
pub fn build_client(settings: &ClientSettings) -> AppResult<Client> {
    Client::builder()
        .timeout(settings.request_timeout)
        .pool_max_idle_per_host(settings.pool_size.max(1))
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}
