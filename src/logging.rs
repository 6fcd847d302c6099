//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI, so log lines go to the configured file or
//! nowhere. `RUST_LOG` takes precedence over the configured level.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{Result, UiError};

pub fn init(config: &LoggingConfig) -> Result<()> {
    let dispatch = build(config)?;
    tracing::dispatcher::set_global_default(dispatch)
        .map_err(|e| UiError::InitializationError(format!("logging: {e}")))?;
    Ok(())
}

fn build(config: &LoggingConfig) -> Result<Dispatch> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let writer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::sink),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false);

    Ok(match config.format {
        LogFormat::Text => Dispatch::new(builder.finish()),
        LogFormat::Json => Dispatch::new(builder.json().finish()),
    })
}
