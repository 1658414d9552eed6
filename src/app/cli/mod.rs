//! CLI module: argument parsing, configuration file loading and display

pub mod args;
pub mod config;
pub mod display;

pub use args::{Args, ReportFormat};
pub use config::ConfigError;
