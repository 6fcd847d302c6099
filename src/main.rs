/// Entry point for the sensor panel.
///
/// 1. Parses the command line and loads the layered configuration.
/// 2. Installs the tracing subscriber.
/// 3. Builds the configured sensor backend and its sensor manager.
/// 4. Runs the single screen until the user quits or a signal arrives.
use std::time::Duration;

use anyhow::{Context, Result};

mod cli;
mod config;
mod error;
mod logging;
mod presentation;
mod sensors;
mod state;
mod ui;

use cli::Cli;
use config::{AppConfig, Backend};
use sensors::iio::IioProvider;
use sensors::manager::SamplingManager;
use sensors::simulated::SimulatedProvider;
use sensors::SensorProvider;
use ui::Screen;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    config.apply_cli_overrides(&cli);
    config.validate()?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    if !atty::is(atty::Stream::Stdout) {
        anyhow::bail!("sensor-panel needs an interactive terminal on stdout");
    }

    logging::init(&config.logging)?;
    tracing::info!(backend = ?config.platform.backend, delay = ?config.platform.delay, "Starting sensor panel");

    match config.platform.backend {
        Backend::Simulated => {
            let provider = SimulatedProvider::new(&config.platform.simulation);
            run_with(provider, &config).await
        }
        Backend::Iio => {
            let provider = IioProvider::discover(&config.platform.iio)
                .context("Failed to scan IIO devices")?;
            run_with(provider, &config).await
        }
    }
}

async fn run_with<P: SensorProvider>(provider: P, config: &AppConfig) -> Result<()> {
    for sensor in provider.sensors() {
        tracing::info!(sensor = %sensor.kind, info = %sensor.info(), "Sensor available");
    }

    let (manager, events) = SamplingManager::new(provider);
    let mut screen = Screen::new(manager, &config.screen, config.platform.delay);
    let refresh = Duration::from_millis(config.screen.refresh_interval_ms);

    let result = ui::run(&mut screen, events, refresh).await;
    tracing::info!("Sensor panel stopped");
    Ok(result?)
}
