use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDateTime};
use clap::{Parser, Subcommand};
use grove_core::{
    Config, FixedClock, LocalClock, MockCondition, ProviderId, RefreshScheduler, TimeSource,
    WeatherProvider, WeatherReading, Widgets,
    config::Location,
    provider::{default_provider_from_config, provider_from_config},
};
use inquire::{Confirm, CustomType, Select};
use std::sync::Arc;
use tracing::info;

use crate::terminal::terminal_targets;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "grove", version, about = "Clock, season and weather widgets for the grove page")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render every widget once.
    Show {
        /// Skip the weather service and use mock weather.
        #[arg(long)]
        offline: bool,

        /// Seed for the mock weather draw.
        #[arg(long)]
        seed: Option<u64>,

        /// Preview the icon for a mock condition, e.g. "clouds".
        #[arg(long, value_parser = parse_condition)]
        condition: Option<MockCondition>,

        /// Render for a fixed local time, e.g. "2026-01-14T21:05".
        #[arg(long, value_parser = parse_instant)]
        at: Option<NaiveDateTime>,
    },

    /// Keep the widgets refreshing until Ctrl-C.
    Watch {
        /// Skip the weather service and use mock weather.
        #[arg(long)]
        offline: bool,
    },

    /// Interactively choose provider, location and icon art.
    Configure,

    /// Print the config file location.
    ConfigPath,
}

fn parse_condition(value: &str) -> Result<MockCondition, String> {
    value.parse().map_err(|err| format!("{err}"))
}

fn parse_instant(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .map_err(|err| format!("expected YYYY-MM-DDTHH:MM: {err}"))
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Show { offline, seed, condition, at } => {
                let mut config = Config::load()?;
                if seed.is_some() {
                    config.mock.seed = seed;
                }
                let clock: Arc<dyn TimeSource> = match at {
                    Some(instant) => Arc::new(FixedClock(instant)),
                    None => Arc::new(LocalClock),
                };
                show(&config, clock, offline, condition).await
            }
            Command::Watch { offline } => {
                let config = Config::load()?;
                watch(&config, offline).await
            }
            Command::Configure => configure(),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

fn provider(config: &Config, offline: bool) -> Result<Box<dyn WeatherProvider>> {
    if offline {
        provider_from_config(ProviderId::Offline, config)
    } else {
        default_provider_from_config(config)
    }
}

async fn show(
    config: &Config,
    clock: Arc<dyn TimeSource>,
    offline: bool,
    condition: Option<MockCondition>,
) -> Result<()> {
    let month = clock.now().month();
    let widgets = Widgets::from_config(config, clock, terminal_targets(), provider(config, offline)?);

    widgets.update_time();
    widgets.update_date();
    widgets.update_season().context("Failed to classify the current season")?;

    let update = match condition {
        Some(condition) => widgets.show_reading(WeatherReading::Mock(condition), month),
        None => widgets.update_weather().await,
    };
    println!("{:>13}: {}", "reading", update.reading);

    Ok(())
}

async fn watch(config: &Config, offline: bool) -> Result<()> {
    let widgets = Widgets::from_config(
        config,
        Arc::new(LocalClock),
        terminal_targets(),
        provider(config, offline)?,
    );
    let scheduler = RefreshScheduler::start(Arc::new(widgets), config.refresh.cadence())
        .context("Failed to start widget refresh")?;

    tokio::signal::ctrl_c().await.context("Failed to listen for Ctrl-C")?;
    info!("interrupted, stopping widgets");
    scheduler.shutdown().await;

    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let current = config.default_provider_id().unwrap_or(ProviderId::OpenMeteo);
    let cursor = ProviderId::all().iter().position(|id| *id == current).unwrap_or(0);
    let provider = Select::new("Weather provider:", ProviderId::all().to_vec())
        .with_starting_cursor(cursor)
        .prompt()
        .context("Provider selection aborted")?;
    config.set_default_provider(provider);

    let latitude = CustomType::<f64>::new("Latitude:")
        .with_default(config.location.latitude)
        .with_error_message("Please enter a number")
        .prompt()
        .context("Latitude prompt aborted")?;
    let longitude = CustomType::<f64>::new("Longitude:")
        .with_default(config.location.longitude)
        .with_error_message("Please enter a number")
        .prompt()
        .context("Longitude prompt aborted")?;
    config.location = Location { latitude, longitude };

    config.icons.snow = Confirm::new("Does the page ship Snow.png?")
        .with_default(config.icons.snow)
        .prompt()
        .context("Snow art prompt aborted")?;

    config.validate()?;
    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
