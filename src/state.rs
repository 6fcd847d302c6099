//! Latest-value display state.

use crate::sensors::{SensorEvent, SensorKind};

/// One decoded sensor reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorReading {
    Proximity(f32),
    Light(f32),
    Acceleration { x: f32, y: f32, z: f32 },
}

impl SensorReading {
    /// Decodes an event. Unknown sensor types and events carrying fewer
    /// values than their kind needs yield `None`.
    pub fn from_event(event: &SensorEvent) -> Option<Self> {
        let kind = event.kind()?;
        if event.values.len() < kind.value_count() {
            return None;
        }

        let reading = match kind {
            SensorKind::Proximity => SensorReading::Proximity(event.values[0]),
            SensorKind::Light => SensorReading::Light(event.values[0]),
            SensorKind::Accelerometer => SensorReading::Acceleration {
                x: event.values[0],
                y: event.values[1],
                z: event.values[2],
            },
        };
        Some(reading)
    }
}

/// The three most recent readings. Starts all zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplayState {
    pub proximity: f32,
    pub light: f32,
    pub acceleration: [f32; 3],
}

impl DisplayState {
    /// Overwrites the one field the reading belongs to.
    pub fn apply(&mut self, reading: SensorReading) {
        match reading {
            SensorReading::Proximity(distance) => self.proximity = distance,
            SensorReading::Light(lux) => self.light = lux,
            SensorReading::Acceleration { x, y, z } => self.acceleration = [x, y, z],
        }
    }
}
