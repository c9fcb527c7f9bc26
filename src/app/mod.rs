//! Run orchestration: resolve the run, drive the load, report the results.
mod export;
mod runner;
mod summary;


pub(crate) use export::export_json;
pub(crate) use runner::{RunConfig, run_load};
pub(crate) use summary::{parameter_lines, print_lines, result_lines, saved_line};
