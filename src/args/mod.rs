//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
#[cfg(test)]
mod test_support;
mod types;


pub use cli::LoadArgs;
pub use types::{PositiveU64, PositiveUsize, TestType};

pub(crate) use defaults::DEFAULT_USER_AGENT;
#[cfg(test)]
pub(crate) use defaults::DEFAULT_ENDPOINT;
