//! Sensor model shared by the platform backends and the screen.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::SensorError;

pub mod iio;
pub mod manager;
pub mod simulated;
pub mod subscriber;

/// Platform type tag for accelerometer events.
pub const TYPE_ACCELEROMETER: i32 = 1;
/// Platform type tag for ambient light events.
pub const TYPE_LIGHT: i32 = 5;
/// Platform type tag for proximity events.
pub const TYPE_PROXIMITY: i32 = 8;

/// The three sensor kinds the panel knows how to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    Proximity,
    Light,
    Accelerometer,
}

impl SensorKind {
    pub const ALL: [SensorKind; 3] = [
        SensorKind::Proximity,
        SensorKind::Light,
        SensorKind::Accelerometer,
    ];

    pub fn type_code(self) -> i32 {
        match self {
            SensorKind::Proximity => TYPE_PROXIMITY,
            SensorKind::Light => TYPE_LIGHT,
            SensorKind::Accelerometer => TYPE_ACCELEROMETER,
        }
    }

    /// Maps a platform type tag back to a kind. Unknown tags yield `None`.
    pub fn from_type_code(code: i32) -> Option<Self> {
        match code {
            TYPE_PROXIMITY => Some(SensorKind::Proximity),
            TYPE_LIGHT => Some(SensorKind::Light),
            TYPE_ACCELEROMETER => Some(SensorKind::Accelerometer),
            _ => None,
        }
    }

    pub fn reporting_mode(self) -> ReportingMode {
        match self {
            SensorKind::Accelerometer => ReportingMode::Continuous,
            SensorKind::Proximity | SensorKind::Light => ReportingMode::OnChange,
        }
    }

    /// Number of values an event of this kind carries.
    pub fn value_count(self) -> usize {
        match self {
            SensorKind::Accelerometer => 3,
            SensorKind::Proximity | SensorKind::Light => 1,
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SensorKind::Proximity => "proximity",
            SensorKind::Light => "light",
            SensorKind::Accelerometer => "accelerometer",
        };
        f.write_str(name)
    }
}

/// When a sensor produces events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportingMode {
    /// Every sampling period.
    Continuous,
    /// Only when the value differs from the previous event.
    OnChange,
}

/// Requested sampling tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SensorDelay {
    Fastest,
    Game,
    Ui,
    #[default]
    Normal,
}

impl SensorDelay {
    /// Sampling period for this tier. `Fastest` is clamped so that a sampling
    /// task always yields to the runtime.
    pub fn period(self) -> Duration {
        match self {
            SensorDelay::Fastest => Duration::from_millis(5),
            SensorDelay::Game => Duration::from_millis(20),
            SensorDelay::Ui => Duration::from_millis(66),
            SensorDelay::Normal => Duration::from_millis(200),
        }
    }
}

/// Description of one available hardware sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    pub kind: SensorKind,
    pub name: String,
    pub vendor: String,
    pub max_range: Option<f32>,
}

impl Sensor {
    pub fn info(&self) -> String {
        match self.max_range {
            Some(max) => format!("{} ({}, max {max})", self.name, self.vendor),
            None => format!("{} ({})", self.name, self.vendor),
        }
    }
}

/// A single reading delivered by the sensor manager.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorEvent {
    pub sensor_type: i32,
    pub values: Vec<f32>,
    pub timestamp: DateTime<Utc>,
}

impl SensorEvent {
    pub fn new(kind: SensorKind, values: Vec<f32>) -> Self {
        Self {
            sensor_type: kind.type_code(),
            values,
            timestamp: Utc::now(),
        }
    }

    pub fn kind(&self) -> Option<SensorKind> {
        SensorKind::from_type_code(self.sensor_type)
    }
}

/// An opened sensor that can be sampled.
#[async_trait]
pub trait SensorSource: Send {
    async fn sample(&mut self) -> Result<Vec<f32>, SensorError>;
}

/// A platform backend: enumerates sensors and opens them for sampling.
pub trait SensorProvider: Send + Sync + 'static {
    fn sensors(&self) -> Vec<Sensor>;

    fn open(&self, kind: SensorKind) -> Result<Box<dyn SensorSource>, SensorError>;

    fn default_sensor(&self, kind: SensorKind) -> Option<Sensor> {
        self.sensors().into_iter().find(|sensor| sensor.kind == kind)
    }
}
