//! Command-line interface argument parsing.
//!
//! Every option except `--config` and `--print-config` overrides the
//! corresponding configuration value when given.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::Backend;
use crate::presentation::Language;
use crate::sensors::SensorDelay;

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Show all messages including trace
    Trace,
    /// Show debug messages and above
    Debug,
    /// Show info messages and above
    Info,
    /// Show warnings and errors only
    Warn,
    /// Show errors only
    Error,
}

impl LogLevel {
    /// Convert LogLevel to a tracing filter string
    pub fn to_filter_string(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Sensor panel: live proximity, light and accelerometer readings
#[derive(Parser, Debug)]
#[command(name = "sensor-panel")]
#[command(version)]
#[command(about = "Shows live proximity, light and accelerometer readings", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "sensor-panel.toml")]
    pub config: PathBuf,

    /// Sensor backend
    #[arg(short, long, value_enum)]
    pub backend: Option<Backend>,

    /// Sampling delay tier
    #[arg(short, long, value_enum)]
    pub delay: Option<SensorDelay>,

    /// Label language
    #[arg(long, value_enum)]
    pub language: Option<Language>,

    /// Log level
    #[arg(short, long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
