//! Application configuration management.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `SENSOR_PANEL__*` environment variables, then CLI overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::presentation::Language;
use crate::sensors::{SensorDelay, SensorKind};

/// Environment variable prefix, e.g. `SENSOR_PANEL__PLATFORM__BACKEND=iio`.
pub const ENV_PREFIX: &str = "SENSOR_PANEL";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level application configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub screen: ScreenConfig,
    pub logging: LoggingConfig,
    pub platform: PlatformConfig,
}

/// Screen behavior
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScreenConfig {
    pub refresh_interval_ms: u64,
    pub language: Language,
    pub pause_on_focus_loss: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Which sensor backend to use and how to sample it
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PlatformConfig {
    pub backend: Backend,
    pub delay: SensorDelay,
    pub iio: IioConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Simulated,
    Iio,
}

/// Linux Industrial I/O backend settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct IioConfig {
    pub root: PathBuf,
    pub proximity_mode: ProximityMode,
    /// In intensity mode, readings at or above this count as near.
    pub proximity_near_threshold: f32,
}

/// How an IIO proximity channel should be read
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProximityMode {
    /// The channel reports a distance.
    #[default]
    Distance,
    /// The channel reports reflected intensity; larger means closer.
    Intensity,
}

/// Simulated backend settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Sensor kinds the simulated device lacks.
    pub absent: Vec<SensorKind>,
    /// How long each simulated pose or state is held.
    pub step_ms: u64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 250,
            language: Language::default(),
            pause_on_focus_loss: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            format: LogFormat::default(),
        }
    }
}

impl Default for IioConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(crate::sensors::iio::DEFAULT_IIO_ROOT),
            proximity_mode: ProximityMode::default(),
            proximity_near_threshold: 100.0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            absent: Vec::new(),
            step_ms: 3000,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path` (if it exists) and the environment.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(ConfigError::LoadError)?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(ConfigError::LoadError)?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.screen.refresh_interval_ms == 0 {
            return Err(invalid("screen.refresh_interval_ms", "must be greater than 0"));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(invalid(
                "logging.level",
                "must be one of trace, debug, info, warn, error",
            ));
        }

        if self.platform.iio.root.as_os_str().is_empty() {
            return Err(invalid("platform.iio.root", "cannot be empty"));
        }

        if !self.platform.iio.proximity_near_threshold.is_finite() {
            return Err(invalid("platform.iio.proximity_near_threshold", "must be finite"));
        }

        if self.platform.simulation.step_ms == 0 {
            return Err(invalid("platform.simulation.step_ms", "must be greater than 0"));
        }

        Ok(())
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(backend) = cli.backend {
            self.platform.backend = backend;
        }

        if let Some(delay) = cli.delay {
            self.platform.delay = delay;
        }

        if let Some(language) = cli.language {
            self.screen.language = language;
        }

        if let Some(level) = cli.log_level {
            self.logging.level = level.to_filter_string().to_string();
        }

        if let Some(file) = &cli.log_file {
            self.logging.file = Some(file.clone());
        }
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?)
    }
}

fn invalid(field: &str, message: &str) -> crate::error::AppError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}
