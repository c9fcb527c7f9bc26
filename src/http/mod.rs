//! HTTP client construction and single-request execution.
mod client;
mod executor;
mod target;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

pub use client::{ClientSettings, build_client};
pub use executor::{HttpExecutor, RequestExecutor};
pub use target::normalize_base_url;
