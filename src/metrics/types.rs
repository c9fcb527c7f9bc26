use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Serialize, Serializer};

/// Fallback description for request errors that carry no message.
const UNKNOWN_REQUEST_ERROR: &str = "request failed";

/// Outcome of a single request attempt.
///
/// A sample either carries the HTTP status of a completed response, or the
/// reserved status `0` together with a description of the request-level
/// error. The two shapes are only reachable through [`Sample::response`] and
/// [`Sample::request_error`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sample {
    timestamp: DateTime<Utc>,
    #[serde(serialize_with = "serialize_secs")]
    response_time: Duration,
    status_code: u16,
    error: Option<String>,
}

impl Sample {
    /// Status code recorded for attempts that never produced a response.
    pub const REQUEST_ERROR_STATUS: u16 = 0;

    #[must_use]
    pub const fn response(
        timestamp: DateTime<Utc>,
        response_time: Duration,
        status: StatusCode,
    ) -> Self {
        Self {
            timestamp,
            response_time,
            status_code: status.as_u16(),
            error: None,
        }
    }

    #[must_use]
    pub fn request_error(
        timestamp: DateTime<Utc>,
        response_time: Duration,
        error: impl Into<String>,
    ) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            UNKNOWN_REQUEST_ERROR.clone_into(&mut error);
        }
        Self {
            timestamp,
            response_time,
            status_code: Self::REQUEST_ERROR_STATUS,
            error: Some(error),
        }
    }

    /// Completion instant of the attempt.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub const fn response_time(&self) -> Duration {
        self.response_time
    }

    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code == StatusCode::OK.as_u16()
    }
}

/// Aggregate statistics for one run.
///
/// Latency fields only consider successful samples; durations serialize as
/// fractional seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub test_name: String,
    #[serde(serialize_with = "serialize_secs")]
    pub duration: Duration,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    #[serde(serialize_with = "serialize_secs")]
    pub avg_response_time: Duration,
    #[serde(serialize_with = "serialize_secs")]
    pub min_response_time: Duration,
    #[serde(serialize_with = "serialize_secs")]
    pub max_response_time: Duration,
    #[serde(serialize_with = "serialize_secs")]
    pub p95_response_time: Duration,
    pub requests_per_second: f64,
}

impl Summary {
    #[must_use]
    pub fn empty(test_name: &str) -> Self {
        Self {
            test_name: test_name.to_owned(),
            duration: Duration::ZERO,
            total_requests: 0,
            successful_requests: 0,
            failed_requests: 0,
            avg_response_time: Duration::ZERO,
            min_response_time: Duration::ZERO,
            max_response_time: Duration::ZERO,
            p95_response_time: Duration::ZERO,
            requests_per_second: 0.0,
        }
    }
}

fn serialize_secs<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(value.as_secs_f64())
}
