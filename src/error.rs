//! Custom error types for the sensor panel.
//!
//! The sensor path itself never surfaces errors to the screen; these types
//! cover startup and the plumbing around it (configuration, terminal, sysfs).

use thiserror::Error;

/// Errors related to sensor backends
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("Malformed sensor value in {path}: {value:?}")]
    ParseError { path: String, value: String },

    #[error("Sensor backend unavailable: {0}")]
    Unavailable(String),

    #[error("Sensor IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to application configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors related to the UI
#[derive(Debug, Error)]
pub enum UiError {
    #[error("Terminal initialization failed: {0}")]
    InitializationError(String),

    #[error("Terminal rendering failed: {0}")]
    RenderError(String),

    #[error("Input handling failed: {0}")]
    InputError(String),

    #[error("Signal handling error: {0}")]
    SignalError(String),
}

/// Application-level errors that can wrap other error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Sensor error: {0}")]
    Sensor(#[from] SensorError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("UI error: {0}")]
    Ui(#[from] UiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;
