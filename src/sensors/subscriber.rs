//! Lifecycle-scoped subscription to the three displayed sensors.

use super::manager::SensorManager;
use super::{Sensor, SensorDelay, SensorEvent, SensorKind};
use crate::state::{DisplayState, SensorReading};

pub struct SensorSubscriber<M: SensorManager> {
    manager: M,
    delay: SensorDelay,
    registered: Vec<Sensor>,
}

impl<M: SensorManager> SensorSubscriber<M> {
    pub fn new(manager: M, delay: SensorDelay) -> Self {
        Self {
            manager,
            delay,
            registered: Vec::new(),
        }
    }

    /// Registers every displayed sensor the device has. Absent sensors are
    /// skipped without complaint.
    pub fn resume(&mut self) {
        for kind in SensorKind::ALL {
            if self.is_registered(kind) {
                continue;
            }
            let Some(sensor) = self.manager.default_sensor(kind) else {
                tracing::debug!(sensor = %kind, "Sensor not present, skipping");
                continue;
            };
            if self.manager.register_listener(&sensor, self.delay) {
                self.registered.push(sensor);
            }
        }
    }

    /// Unregisters everything. Idempotent.
    pub fn pause(&mut self) {
        self.manager.unregister_listener();
        self.registered.clear();
    }

    /// Applies `event` to the one state field it belongs to. Returns whether
    /// the state changed; unknown or malformed events leave it untouched.
    pub fn dispatch(&self, state: &mut DisplayState, event: &SensorEvent) -> bool {
        match SensorReading::from_event(event) {
            Some(reading) => {
                state.apply(reading);
                true
            }
            None => {
                tracing::debug!(
                    sensor_type = event.sensor_type,
                    values = event.values.len(),
                    "Ignoring sensor event"
                );
                false
            }
        }
    }

    pub fn is_registered(&self, kind: SensorKind) -> bool {
        self.registered.iter().any(|sensor| sensor.kind == kind)
    }

    pub fn registered(&self) -> &[Sensor] {
        &self.registered
    }

    pub fn delay(&self) -> SensorDelay {
        self.delay
    }
}

impl<M: SensorManager> Drop for SensorSubscriber<M> {
    fn drop(&mut self) {
        self.pause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::manager::MockSensorManager;
    use crate::sensors::{TYPE_LIGHT, TYPE_PROXIMITY};
    use mockall::predicate::*;

    fn sensor(kind: SensorKind) -> Sensor {
        Sensor {
            kind,
            name: format!("mock-{kind}"),
            vendor: "mock".to_string(),
            max_range: Some(10.0),
        }
    }

    #[test]
    fn test_resume_registers_present_sensors_only() {
        let mut manager = MockSensorManager::new();
        manager
            .expect_default_sensor()
            .with(eq(SensorKind::Proximity))
            .return_const(None::<Sensor>);
        manager
            .expect_default_sensor()
            .with(eq(SensorKind::Light))
            .return_const(Some(sensor(SensorKind::Light)));
        manager
            .expect_default_sensor()
            .with(eq(SensorKind::Accelerometer))
            .return_const(Some(sensor(SensorKind::Accelerometer)));
        manager
            .expect_register_listener()
            .withf(|sensor, delay| {
                sensor.kind != SensorKind::Proximity && *delay == SensorDelay::Normal
            })
            .times(2)
            .return_const(true);
        manager.expect_unregister_listener().return_const(());

        let mut subscriber = SensorSubscriber::new(manager, SensorDelay::Normal);
        subscriber.resume();

        assert!(!subscriber.is_registered(SensorKind::Proximity));
        assert!(subscriber.is_registered(SensorKind::Light));
        assert!(subscriber.is_registered(SensorKind::Accelerometer));
    }

    #[test]
    fn test_failed_registration_is_not_recorded() {
        let mut manager = MockSensorManager::new();
        manager
            .expect_default_sensor()
            .returning(|kind| Some(sensor(kind)));
        manager.expect_register_listener().return_const(false);
        manager.expect_unregister_listener().return_const(());

        let mut subscriber = SensorSubscriber::new(manager, SensorDelay::Ui);
        subscriber.resume();
        assert!(subscriber.registered().is_empty());
    }

    #[test]
    fn test_pause_without_resume_is_safe() {
        let mut manager = MockSensorManager::new();
        manager.expect_unregister_listener().times(3).return_const(());

        let mut subscriber = SensorSubscriber::new(manager, SensorDelay::Normal);
        subscriber.pause();
        subscriber.pause();
        assert!(subscriber.registered().is_empty());
        // third call comes from Drop
    }

    #[test]
    fn test_dispatch_updates_matching_field() {
        let mut manager = MockSensorManager::new();
        manager.expect_unregister_listener().return_const(());
        let subscriber = SensorSubscriber::new(manager, SensorDelay::Normal);

        let mut state = DisplayState::default();
        let event = SensorEvent::new(SensorKind::Proximity, vec![8.0]);
        assert!(subscriber.dispatch(&mut state, &event));
        assert_eq!(state.proximity, 8.0);
        assert_eq!(state.light, 0.0);

        let event = SensorEvent {
            sensor_type: TYPE_LIGHT,
            ..SensorEvent::new(SensorKind::Light, vec![250.0])
        };
        assert!(subscriber.dispatch(&mut state, &event));
        assert_eq!(state.light, 250.0);
        assert_eq!(state.proximity, 8.0);
    }

    #[test]
    fn test_dispatch_ignores_unknown_type() {
        let mut manager = MockSensorManager::new();
        manager.expect_unregister_listener().return_const(());
        let subscriber = SensorSubscriber::new(manager, SensorDelay::Normal);

        let mut state = DisplayState {
            proximity: 3.0,
            light: 75.0,
            acceleration: [0.0, 9.8, 0.0],
        };
        let before = state;
        let event = SensorEvent {
            sensor_type: 4,
            ..SensorEvent::new(SensorKind::Proximity, vec![1.0, 1.0, 1.0])
        };
        assert!(!subscriber.dispatch(&mut state, &event));
        assert_eq!(state, before);

        let short = SensorEvent {
            sensor_type: TYPE_PROXIMITY,
            values: vec![],
            ..event
        };
        assert!(!subscriber.dispatch(&mut state, &short));
        assert_eq!(state, before);
    }
}
