//! Myrstat CLI Library
//!
//! Glue between configuration, the RPC block source, the statistics engine
//! and the chart documents written for the plotting front end.

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod args;
pub mod charts;
pub mod display;
pub mod output;

pub use args::{CliArgs, LogLevel};
pub use charts::{build_charts, Chart, Line, Panel};
pub use output::write_charts;
