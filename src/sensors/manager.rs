//! Sensor manager: the registry the screen subscribes through.
//!
//! `SamplingManager` turns any [`SensorProvider`] into a push-style event
//! source. Each registered sensor gets one sampling task that writes owned
//! [`SensorEvent`]s onto a single queue, which the screen drains on its own
//! task.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::{ReportingMode, Sensor, SensorDelay, SensorEvent, SensorKind, SensorProvider, SensorSource};

/// Platform sensor registry.
#[cfg_attr(test, mockall::automock)]
pub trait SensorManager {
    /// The default sensor of `kind`, if the device has one.
    fn default_sensor(&self, kind: SensorKind) -> Option<Sensor>;

    /// Starts delivering events for `sensor`. Returns `false` if the sensor
    /// could not be opened. Registering an already registered kind is a no-op.
    fn register_listener(&mut self, sensor: &Sensor, delay: SensorDelay) -> bool;

    /// Stops every registration. Safe to call at any time.
    fn unregister_listener(&mut self);
}

pub type EventReceiver = mpsc::UnboundedReceiver<SensorEvent>;

pub struct SamplingManager<P: SensorProvider> {
    provider: P,
    events: mpsc::UnboundedSender<SensorEvent>,
    root: CancellationToken,
    registrations: HashMap<SensorKind, CancellationToken>,
}

impl<P: SensorProvider> SamplingManager<P> {
    /// Create a manager over `provider` along with the queue its events arrive on.
    pub fn new(provider: P) -> (Self, EventReceiver) {
        let (events, receiver) = mpsc::unbounded_channel();
        let manager = Self {
            provider,
            events,
            root: CancellationToken::new(),
            registrations: HashMap::new(),
        };
        (manager, receiver)
    }

    pub fn is_registered(&self, kind: SensorKind) -> bool {
        self.registrations.contains_key(&kind)
    }
}

impl<P: SensorProvider> SensorManager for SamplingManager<P> {
    fn default_sensor(&self, kind: SensorKind) -> Option<Sensor> {
        self.provider.default_sensor(kind)
    }

    fn register_listener(&mut self, sensor: &Sensor, delay: SensorDelay) -> bool {
        if self.is_registered(sensor.kind) {
            return true;
        }

        let source = match self.provider.open(sensor.kind) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(sensor = %sensor.kind, error = %e, "Failed to open sensor");
                return false;
            }
        };

        let token = self.root.child_token();
        tokio::spawn(sample_loop(
            sensor.kind,
            source,
            delay,
            self.events.clone(),
            token.clone(),
        ));
        self.registrations.insert(sensor.kind, token);
        tracing::info!(sensor = %sensor.kind, ?delay, "Listener registered");
        true
    }

    fn unregister_listener(&mut self) {
        for (kind, token) in self.registrations.drain() {
            token.cancel();
            tracing::info!(sensor = %kind, "Listener unregistered");
        }
    }
}

impl<P: SensorProvider> Drop for SamplingManager<P> {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

async fn sample_loop(
    kind: SensorKind,
    mut source: Box<dyn SensorSource>,
    delay: SensorDelay,
    events: mpsc::UnboundedSender<SensorEvent>,
    token: CancellationToken,
) {
    let mut interval = tokio::time::interval(delay.period());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut last: Option<Vec<f32>> = None;

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = interval.tick() => {}
        }

        let values = match source.sample().await {
            Ok(values) => values,
            Err(e) => {
                tracing::debug!(sensor = %kind, error = %e, "Sample skipped");
                continue;
            }
        };

        if kind.reporting_mode() == ReportingMode::OnChange && last.as_ref() == Some(&values) {
            continue;
        }
        last = Some(values.clone());

        // The sampled value may land after cancellation; drop it.
        if token.is_cancelled() {
            break;
        }
        if events.send(SensorEvent::new(kind, values)).is_err() {
            break;
        }
    }

    tracing::trace!(sensor = %kind, "Sampling task finished");
}
