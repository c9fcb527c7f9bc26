//! Core library for the `hpa-load` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration parsing, request execution, the burst, sustained and
//! ramp load drivers, and the statistics computed over a finished run. The
//! primary user-facing interface is the `hpa-load` command-line application.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod load;
pub mod metrics;
pub mod shutdown;
