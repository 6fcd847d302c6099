//! Linux Industrial I/O backend.
//!
//! Sensors are discovered once from sysfs (`iio:device*` directories) and
//! sampled by reading their channel files. A processed value is
//! `(raw + offset) * scale`; `*_input` channels are already processed.

use async_trait::async_trait;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{Sensor, SensorKind, SensorProvider, SensorSource};
use crate::config::{IioConfig, ProximityMode};
use crate::error::SensorError;

pub const DEFAULT_IIO_ROOT: &str = "/sys/bus/iio/devices";

/// Distance reported for "far" when a proximity channel measures intensity.
pub const FAR_DISTANCE: f32 = 5.0;

const PROXIMITY_CHANNELS: [&str; 2] = ["in_proximity", "in_proximity0"];
const LIGHT_CHANNELS: [&str; 2] = ["in_illuminance", "in_illuminance0"];
const ACCEL_AXES: [&str; 3] = ["x", "y", "z"];

#[derive(Debug, Clone, PartialEq)]
struct Channel {
    path: PathBuf,
    scale: f32,
    offset: f32,
}

impl Channel {
    fn convert(&self, raw: f32) -> f32 {
        (raw + self.offset) * self.scale
    }
}

#[derive(Debug, Clone)]
struct IioDevice {
    sensor: Sensor,
    channels: Vec<Channel>,
}

/// Sensors found under an IIO sysfs root.
pub struct IioProvider {
    devices: Vec<IioDevice>,
    proximity_mode: ProximityMode,
    near_threshold: f32,
}

impl IioProvider {
    /// Scan `config.root`. A missing root yields a provider with no sensors,
    /// and a device whose attributes cannot be read or parsed is skipped.
    pub fn discover(config: &IioConfig) -> Result<Self, SensorError> {
        let mut device_dirs = match fs::read_dir(&config.root) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| {
                    path.file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| name.starts_with("iio:device"))
                })
                .collect::<Vec<_>>(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(root = %config.root.display(), "IIO root not found, no sensors available");
                Vec::new()
            }
            Err(e) => return Err(SensorError::Io(e)),
        };
        device_dirs.sort();

        let mut devices: Vec<IioDevice> = Vec::new();
        for dir in device_dirs {
            let probed = match probe_device(&dir, config.proximity_mode) {
                Ok(probed) => probed,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "Skipping unusable IIO device");
                    continue;
                }
            };
            for device in probed {
                if devices.iter().any(|known| known.sensor.kind == device.sensor.kind) {
                    tracing::debug!(sensor = %device.sensor.kind, dir = %dir.display(), "Ignoring additional device");
                    continue;
                }
                tracing::info!(sensor = %device.sensor.kind, info = %device.sensor.info(), "Found IIO sensor");
                devices.push(device);
            }
        }

        Ok(Self {
            devices,
            proximity_mode: config.proximity_mode,
            near_threshold: config.proximity_near_threshold,
        })
    }
}

impl SensorProvider for IioProvider {
    fn sensors(&self) -> Vec<Sensor> {
        self.devices.iter().map(|device| device.sensor.clone()).collect()
    }

    fn open(&self, kind: SensorKind) -> Result<Box<dyn SensorSource>, SensorError> {
        let device = self
            .devices
            .iter()
            .find(|device| device.sensor.kind == kind)
            .ok_or_else(|| SensorError::Unavailable(kind.to_string()))?;

        let threshold = match (kind, self.proximity_mode) {
            (SensorKind::Proximity, ProximityMode::Intensity) => Some(self.near_threshold),
            _ => None,
        };

        Ok(Box::new(IioSource {
            channels: device.channels.clone(),
            near_threshold: threshold,
        }))
    }
}

struct IioSource {
    channels: Vec<Channel>,
    near_threshold: Option<f32>,
}

#[async_trait]
impl SensorSource for IioSource {
    async fn sample(&mut self) -> Result<Vec<f32>, SensorError> {
        let mut values = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            let text = tokio::fs::read_to_string(&channel.path).await?;
            let raw = parse_value(&channel.path, &text)?;
            values.push(channel.convert(raw));
        }

        if let Some(threshold) = self.near_threshold {
            for value in &mut values {
                *value = if *value >= threshold { 0.0 } else { FAR_DISTANCE };
            }
        }

        Ok(values)
    }
}

fn probe_device(dir: &Path, proximity_mode: ProximityMode) -> Result<Vec<IioDevice>, SensorError> {
    let name = read_trimmed(&dir.join("name"))?.unwrap_or_else(|| {
        dir.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    let mut found = Vec::new();

    if let Some(channel) = find_scalar(dir, &PROXIMITY_CHANNELS)? {
        let max_range = match proximity_mode {
            ProximityMode::Intensity => Some(FAR_DISTANCE),
            ProximityMode::Distance => None,
        };
        found.push(device(SensorKind::Proximity, &name, max_range, vec![channel]));
    }

    if let Some(channel) = find_scalar(dir, &LIGHT_CHANNELS)? {
        found.push(device(SensorKind::Light, &name, None, vec![channel]));
    }

    let mut axes = Vec::with_capacity(3);
    for axis in ACCEL_AXES {
        let raw = dir.join(format!("in_accel_{axis}_raw"));
        if !raw.is_file() {
            break;
        }
        axes.push(Channel {
            path: raw,
            scale: read_attribute(dir, &[&format!("in_accel_{axis}_scale"), "in_accel_scale"])?
                .unwrap_or(1.0),
            offset: read_attribute(dir, &[&format!("in_accel_{axis}_offset"), "in_accel_offset"])?
                .unwrap_or(0.0),
        });
    }
    if axes.len() == 3 {
        found.push(device(SensorKind::Accelerometer, &name, None, axes));
    }

    Ok(found)
}

fn device(kind: SensorKind, name: &str, max_range: Option<f32>, channels: Vec<Channel>) -> IioDevice {
    IioDevice {
        sensor: Sensor {
            kind,
            name: name.to_string(),
            vendor: "iio".to_string(),
            max_range,
        },
        channels,
    }
}

/// Find a processed (`_input`) or raw (`_raw`) channel under any of `bases`.
fn find_scalar(dir: &Path, bases: &[&str]) -> Result<Option<Channel>, SensorError> {
    for base in bases {
        let input = dir.join(format!("{base}_input"));
        if input.is_file() {
            return Ok(Some(Channel {
                path: input,
                scale: 1.0,
                offset: 0.0,
            }));
        }

        let raw = dir.join(format!("{base}_raw"));
        if raw.is_file() {
            return Ok(Some(Channel {
                path: raw,
                scale: read_attribute(dir, &[&format!("{base}_scale")])?.unwrap_or(1.0),
                offset: read_attribute(dir, &[&format!("{base}_offset")])?.unwrap_or(0.0),
            }));
        }
    }
    Ok(None)
}

/// First attribute among `names` that exists, parsed as a float.
fn read_attribute(dir: &Path, names: &[&str]) -> Result<Option<f32>, SensorError> {
    for name in names {
        let path = dir.join(name);
        if let Some(text) = read_trimmed(&path)? {
            return parse_value(&path, &text).map(Some);
        }
    }
    Ok(None)
}

fn read_trimmed(path: &Path) -> Result<Option<String>, SensorError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text.trim().to_string())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SensorError::Io(e)),
    }
}

fn parse_value(path: &Path, text: &str) -> Result<f32, SensorError> {
    text.trim().parse::<f32>().map_err(|_| SensorError::ParseError {
        path: path.display().to_string(),
        value: text.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, file: &str, contents: &str) {
        fs::write(dir.join(file), format!("{contents}\n")).unwrap();
    }

    fn fake_root() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();

        let als = root.path().join("iio:device0");
        fs::create_dir(&als).unwrap();
        write(&als, "name", "stk3310");
        write(&als, "in_proximity_raw", "120");
        write(&als, "in_illuminance_raw", "40");
        write(&als, "in_illuminance_scale", "2.5");

        let imu = root.path().join("iio:device1");
        fs::create_dir(&imu).unwrap();
        write(&imu, "name", "bmi160");
        write(&imu, "in_accel_x_raw", "0");
        write(&imu, "in_accel_y_raw", "-200");
        write(&imu, "in_accel_z_raw", "1000");
        write(&imu, "in_accel_scale", "0.00981");

        fs::create_dir(root.path().join("trigger0")).unwrap();
        root
    }

    fn config(root: &Path, mode: ProximityMode) -> IioConfig {
        IioConfig {
            root: root.to_path_buf(),
            proximity_mode: mode,
            proximity_near_threshold: 100.0,
        }
    }

    #[test]
    fn test_missing_root_has_no_sensors() {
        let root = tempfile::tempdir().unwrap();
        let provider =
            IioProvider::discover(&config(&root.path().join("nope"), ProximityMode::Distance)).unwrap();
        assert!(provider.sensors().is_empty());
        assert!(provider.open(SensorKind::Light).is_err());
    }

    #[test]
    fn test_discovers_all_kinds() {
        let root = fake_root();
        let provider = IioProvider::discover(&config(root.path(), ProximityMode::Distance)).unwrap();

        let kinds: Vec<SensorKind> = provider.sensors().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SensorKind::Proximity, SensorKind::Light, SensorKind::Accelerometer]
        );
        assert_eq!(provider.default_sensor(SensorKind::Light).unwrap().name, "stk3310");
        assert_eq!(provider.default_sensor(SensorKind::Accelerometer).unwrap().name, "bmi160");
    }

    #[test]
    fn test_partial_accelerometer_is_ignored() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("iio:device0");
        fs::create_dir(&dir).unwrap();
        write(&dir, "in_accel_x_raw", "1");
        write(&dir, "in_accel_y_raw", "1");

        let provider = IioProvider::discover(&config(root.path(), ProximityMode::Distance)).unwrap();
        assert!(provider.default_sensor(SensorKind::Accelerometer).is_none());
    }

    #[test]
    fn test_processed_channel_preferred() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("iio:device0");
        fs::create_dir(&dir).unwrap();
        write(&dir, "in_illuminance_input", "321.5");
        write(&dir, "in_illuminance_raw", "1");

        let channel = find_scalar(&dir, &LIGHT_CHANNELS).unwrap().unwrap();
        assert!(channel.path.ends_with("in_illuminance_input"));
        assert_eq!(channel.scale, 1.0);
    }

    #[tokio::test]
    async fn test_sample_applies_scale() {
        let root = fake_root();
        let provider = IioProvider::discover(&config(root.path(), ProximityMode::Distance)).unwrap();

        let mut light = provider.open(SensorKind::Light).unwrap();
        assert_eq!(light.sample().await.unwrap(), vec![100.0]);

        let mut accel = provider.open(SensorKind::Accelerometer).unwrap();
        let values = accel.sample().await.unwrap();
        assert_eq!(values.len(), 3);
        assert!((values[1] + 1.962).abs() < 1e-4);
        assert!((values[2] - 9.81).abs() < 1e-4);
    }

    #[tokio::test]
    async fn test_intensity_mode_proximity() {
        let root = fake_root();
        let provider = IioProvider::discover(&config(root.path(), ProximityMode::Intensity)).unwrap();
        let mut proximity = provider.open(SensorKind::Proximity).unwrap();
        assert_eq!(proximity.sample().await.unwrap(), vec![0.0]);

        write(&root.path().join("iio:device0"), "in_proximity_raw", "3");
        assert_eq!(proximity.sample().await.unwrap(), vec![FAR_DISTANCE]);
    }

    #[test]
    fn test_unusable_device_is_skipped() {
        let root = tempfile::tempdir().unwrap();
        let good = root.path().join("iio:device0");
        fs::create_dir(&good).unwrap();
        write(&good, "in_illuminance_input", "10");

        let bad = root.path().join("iio:device1");
        fs::create_dir(&bad).unwrap();
        write(&bad, "in_accel_x_raw", "1");
        write(&bad, "in_accel_y_raw", "1");
        write(&bad, "in_accel_z_raw", "1");
        write(&bad, "in_accel_scale", "n/a");

        let provider = IioProvider::discover(&config(root.path(), ProximityMode::Distance)).unwrap();
        let kinds: Vec<SensorKind> = provider.sensors().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SensorKind::Light]);
        assert!(provider.default_sensor(SensorKind::Accelerometer).is_none());
    }

    #[tokio::test]
    async fn test_offset_is_added_before_scaling() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("iio:device0");
        fs::create_dir(&dir).unwrap();
        write(&dir, "in_illuminance_raw", "10");
        write(&dir, "in_illuminance_scale", "2");
        write(&dir, "in_illuminance_offset", "5");
        write(&dir, "in_accel_x_raw", "10");
        write(&dir, "in_accel_y_raw", "10");
        write(&dir, "in_accel_z_raw", "10");
        write(&dir, "in_accel_scale", "0.5");
        write(&dir, "in_accel_offset", "-2");
        write(&dir, "in_accel_z_offset", "4");

        let provider = IioProvider::discover(&config(root.path(), ProximityMode::Distance)).unwrap();

        let mut light = provider.open(SensorKind::Light).unwrap();
        assert_eq!(light.sample().await.unwrap(), vec![30.0]);

        let mut accel = provider.open(SensorKind::Accelerometer).unwrap();
        assert_eq!(accel.sample().await.unwrap(), vec![4.0, 4.0, 7.0]);
    }

    #[tokio::test]
    async fn test_malformed_value_is_an_error() {
        let root = fake_root();
        let provider = IioProvider::discover(&config(root.path(), ProximityMode::Distance)).unwrap();
        write(&root.path().join("iio:device0"), "in_illuminance_raw", "garbage");

        let mut light = provider.open(SensorKind::Light).unwrap();
        assert!(matches!(
            light.sample().await,
            Err(SensorError::ParseError { .. })
        ));
    }
}
