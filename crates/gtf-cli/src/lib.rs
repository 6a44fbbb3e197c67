//! giftoframes CLI
//!
//! Command-line front end: argument parsing, logging setup, the
//! conversion driver and the printed summary.

pub mod config;
pub mod logging;
pub mod run;
pub mod summary;

pub use config::{Config, ConfigError, USAGE};
pub use run::{run, Report};
pub use summary::{format_duration, format_loop_count, Summary};
