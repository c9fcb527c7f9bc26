use std::error::Error as StdError;

use async_trait::async_trait;
use chrono::Utc;
use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::time::Instant;
use tracing::debug;

use crate::metrics::Sample;

/// Issues one timed request and reports its outcome.
///
/// Implementations never fail: transport problems are folded into the
/// returned [`Sample`].
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, endpoint: &str) -> Sample;
}

/// [`RequestExecutor`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    base_url: String,
}

impl HttpExecutor {
    #[must_use]
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, url: &str) -> Result<StatusCode, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        drain_response_body(response).await?;
        Ok(status)
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, endpoint: &str) -> Sample {
        let url = format!("{}{}", self.base_url, endpoint);
        let start = Instant::now();
        let outcome = self.fetch(&url).await;
        let response_time = start.elapsed();

        match outcome {
            Ok(status) => Sample::response(Utc::now(), response_time, status),
            Err(err) => {
                let description = describe_error(&err);
                debug!("Request to {} failed: {}", url, description);
                Sample::request_error(Utc::now(), response_time, description)
            }
        }
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}

/// Flatten an error and its `source()` chain into one line.
pub(super) fn describe_error(err: &(dyn StdError + 'static)) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }
    description
}
