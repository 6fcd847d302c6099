//! Deterministic stand-in for real hardware.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;

use super::{Sensor, SensorKind, SensorProvider, SensorSource};
use crate::config::SimulationConfig;
use crate::error::SensorError;

const GRAVITY: f32 = 9.81;
const MAX_LUX: f32 = 400.0;
const LIGHT_SWEEP_STEPS: u32 = 8;

/// Poses cycled by the simulated accelerometer, one per step.
pub const POSES: [[f32; 3]; 7] = [
    [0.0, 0.0, GRAVITY],
    [0.0, GRAVITY, 0.0],
    [GRAVITY, 0.0, 0.0],
    [-GRAVITY, 0.0, 0.0],
    [0.0, -GRAVITY, 0.0],
    [0.0, 0.0, -GRAVITY],
    [5.66, 5.66, 5.66],
];

pub struct SimulatedProvider {
    absent: Vec<SensorKind>,
    step: Duration,
}

impl SimulatedProvider {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            absent: config.absent.clone(),
            step: Duration::from_millis(config.step_ms),
        }
    }
}

impl SensorProvider for SimulatedProvider {
    fn sensors(&self) -> Vec<Sensor> {
        SensorKind::ALL
            .into_iter()
            .filter(|kind| !self.absent.contains(kind))
            .map(|kind| Sensor {
                kind,
                name: format!("simulated {kind}"),
                vendor: "sensor-panel".to_string(),
                max_range: Some(match kind {
                    SensorKind::Proximity => 5.0,
                    SensorKind::Light => MAX_LUX,
                    SensorKind::Accelerometer => 2.0 * GRAVITY,
                }),
            })
            .collect()
    }

    fn open(&self, kind: SensorKind) -> Result<Box<dyn SensorSource>, SensorError> {
        if self.absent.contains(&kind) {
            return Err(SensorError::Unavailable(kind.to_string()));
        }
        Ok(Box::new(SimulatedSource {
            kind,
            step: self.step,
            started: Instant::now(),
        }))
    }
}

struct SimulatedSource {
    kind: SensorKind,
    step: Duration,
    started: Instant,
}

impl SimulatedSource {
    fn values_at(&self, elapsed: Duration) -> Vec<f32> {
        let step_ms = self.step.as_millis().max(1);
        let steps = elapsed.as_millis() / step_ms;

        match self.kind {
            SensorKind::Proximity => {
                let distance = if steps % 2 == 0 { 5.0 } else { 0.0 };
                vec![distance]
            }
            SensorKind::Light => {
                let period = step_ms * u128::from(LIGHT_SWEEP_STEPS);
                let phase = (elapsed.as_millis() % period) as f32 / period as f32;
                let lux = MAX_LUX * (1.0 - (2.0 * phase - 1.0).abs());
                vec![lux.round()]
            }
            SensorKind::Accelerometer => {
                let pose = POSES[(steps % POSES.len() as u128) as usize];
                pose.to_vec()
            }
        }
    }
}

#[async_trait]
impl SensorSource for SimulatedSource {
    async fn sample(&mut self) -> Result<Vec<f32>, SensorError> {
        Ok(self.values_at(self.started.elapsed()))
    }
}
