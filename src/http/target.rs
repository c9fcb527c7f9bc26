use url::Url;

use crate::error::{AppError, AppResult, ValidationError};

/// Strip trailing slashes from a base URL and make sure it is an absolute
/// http(s) URL.
///
/// # Errors
///
/// Returns an error when the URL does not parse or uses another scheme.
pub fn normalize_base_url(raw: &str) -> AppResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_owned()),
        other => Err(AppError::validation(ValidationError::UnsupportedScheme {
            scheme: other.to_owned(),
        })),
    }
}
