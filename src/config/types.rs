use std::time::Duration;

use serde::Deserialize;

use crate::args::TestType;
use crate::args::parsers::parse_duration_value;
use crate::error::ValidationError;

/// Settings accepted from `hpa-load.toml` / `hpa-load.json`. Every field is
/// optional and only fills in flags that were not given on the command line.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub test_type: Option<TestType>,
    pub requests: Option<u64>,
    pub concurrency: Option<usize>,
    pub duration: Option<u64>,
    pub rps: Option<u64>,
    pub steps: Option<u64>,
    pub endpoint: Option<String>,
    pub output: Option<String>,
    pub timeout: Option<DurationValue>,
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}
