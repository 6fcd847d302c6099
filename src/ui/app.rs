//! Screen state and lifecycle.
//!
//! The screen owns the display state and the sensor subscription. All
//! mutation happens through the `on_*` callbacks, which the event loop calls
//! one at a time.

use chrono::{DateTime, Utc};

use crate::config::ScreenConfig;
use crate::presentation::Language;
use crate::sensors::manager::SensorManager;
use crate::sensors::subscriber::SensorSubscriber;
use crate::sensors::{SensorDelay, SensorEvent, SensorKind};
use crate::state::DisplayState;
use crate::ui::input::InputAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Resumed,
    Paused,
    Destroyed,
}

pub struct Screen<M: SensorManager> {
    subscriber: SensorSubscriber<M>,
    state: DisplayState,
    lifecycle: Lifecycle,
    language: Language,
    pause_on_focus_loss: bool,
    /// Kinds registered at the most recent resume.
    available: Vec<SensorKind>,
    last_event: Option<DateTime<Utc>>,
    status_message: Option<String>,
    show_help: bool,
    should_quit: bool,
}

impl<M: SensorManager> Screen<M> {
    pub fn new(manager: M, config: &ScreenConfig, delay: SensorDelay) -> Self {
        Self {
            subscriber: SensorSubscriber::new(manager, delay),
            state: DisplayState::default(),
            lifecycle: Lifecycle::Created,
            language: config.language,
            pause_on_focus_loss: config.pause_on_focus_loss,
            available: Vec::new(),
            last_event: None,
            status_message: None,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn on_resume(&mut self) {
        if matches!(self.lifecycle, Lifecycle::Resumed | Lifecycle::Destroyed) {
            return;
        }
        self.subscriber.resume();
        self.available = self.subscriber.registered().iter().map(|s| s.kind).collect();
        self.lifecycle = Lifecycle::Resumed;
        self.status_message = Some(format!(
            "{} of {} sensors active",
            self.available.len(),
            SensorKind::ALL.len()
        ));
        tracing::info!(active = self.available.len(), "Screen resumed");
    }

    /// Unregisters unconditionally, so it is safe from any state.
    pub fn on_pause(&mut self) {
        self.subscriber.pause();
        self.available.clear();
        if self.lifecycle == Lifecycle::Resumed {
            self.lifecycle = Lifecycle::Paused;
            self.status_message = Some("Paused".to_string());
            tracing::info!("Screen paused");
        }
    }

    pub fn on_destroy(&mut self) {
        self.on_pause();
        self.lifecycle = Lifecycle::Destroyed;
        tracing::info!("Screen destroyed");
    }

    /// Applies one delivered event. Events that arrive while not resumed were
    /// already in flight when listeners were released and are dropped.
    pub fn on_sensor_changed(&mut self, event: &SensorEvent) -> bool {
        if self.lifecycle != Lifecycle::Resumed {
            return false;
        }
        let changed = self.subscriber.dispatch(&mut self.state, event);
        if changed {
            self.last_event = Some(event.timestamp);
        }
        changed
    }

    pub fn handle_action(&mut self, action: InputAction) {
        match action {
            InputAction::Quit => self.request_quit(),
            InputAction::TogglePause => match self.lifecycle {
                Lifecycle::Resumed => self.on_pause(),
                Lifecycle::Created | Lifecycle::Paused => self.on_resume(),
                Lifecycle::Destroyed => {}
            },
            InputAction::Resume if self.pause_on_focus_loss => self.on_resume(),
            InputAction::Pause if self.pause_on_focus_loss => self.on_pause(),
            InputAction::ToggleHelp => self.show_help = !self.show_help,
            InputAction::ToggleLanguage => self.language = self.language.toggled(),
            InputAction::Resume | InputAction::Pause | InputAction::None => {}
        }
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn available(&self) -> &[SensorKind] {
        &self.available
    }

    pub fn delay(&self) -> SensorDelay {
        self.subscriber.delay()
    }

    pub fn last_event(&self) -> Option<DateTime<Utc>> {
        self.last_event
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }
}
