//! Logging setup for git-cp.
//!
//! Structured logging goes through the `tracing` crate. Command execution and
//! session transitions emit DEBUG events; enable them with `--verbose` or
//! `RUST_LOG=git_cp=debug`.
//!
//! # Feature Flags
//!
//! - `telemetry` (default): instrumented spans around pushes
//! - `release-logs`: Strip debug/trace at compile time
//! - `max-perf`: Disable all tracing for maximum performance

mod init;

pub use init::{init_telemetry, TelemetryConfig};
