//! Request samples and the statistics computed over a finished run.
mod analyze;
mod types;


pub use analyze::analyze_results;
pub use types::{Sample, Summary};
