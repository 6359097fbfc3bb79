//! # NodeScope Telemetry
//!
//! Logging setup and reporting of what a telemetry configuration selects.

pub mod logging;
pub mod report;

pub use logging::EventLogger;
pub use report::log_selection;
