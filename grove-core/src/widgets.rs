//! The refresh operations each timer runs.
//!
//! Every update recomputes its value from the current instant and writes
//! it to its own display target. Nothing is cached between calls.

use chrono::{Datelike, Timelike};
use std::{
    fmt,
    sync::{Arc, Mutex},
};
use tracing::{debug, error};

use crate::{
    clock::{TimeSource, format_date, format_time},
    config::Config,
    display::{DisplayTargets, TargetId},
    error::InvalidInput,
    mock::{MockWeather, WinterSplit},
    provider::WeatherProvider,
    season::{Season, classify_season},
    weather::{IconSet, MockCondition, WeatherIcon, WeatherReading},
};

/// Outcome of one weather refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherUpdate {
    pub reading: WeatherReading,
    pub season: Season,
    pub icon: WeatherIcon,
    pub image_source: String,
}

/// Everything the widgets need: a clock, the weather source and where to write.
pub struct Widgets {
    clock: Arc<dyn TimeSource>,
    targets: DisplayTargets,
    provider: Box<dyn WeatherProvider>,
    mock: Mutex<MockWeather>,
    icons: IconSet,
}

impl fmt::Debug for Widgets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widgets")
            .field("clock", &self.clock)
            .field("targets", &self.targets)
            .field("provider", &self.provider)
            .field("icons", &self.icons)
            .finish_non_exhaustive()
    }
}

impl Widgets {
    pub fn new(
        clock: Arc<dyn TimeSource>,
        targets: DisplayTargets,
        provider: Box<dyn WeatherProvider>,
        mock: MockWeather,
        icons: IconSet,
    ) -> Self {
        Self { clock, targets, provider, mock: Mutex::new(mock), icons }
    }

    /// Wire the widgets from configuration: icon set and mock seed.
    pub fn from_config(
        config: &Config,
        clock: Arc<dyn TimeSource>,
        targets: DisplayTargets,
        provider: Box<dyn WeatherProvider>,
    ) -> Self {
        let split = WinterSplit::for_snow_art(config.icons.snow);
        let mock = match config.mock.seed {
            Some(seed) => MockWeather::seeded(seed, split),
            None => MockWeather::from_entropy(split),
        };

        Self::new(clock, targets, provider, mock, config.icons.clone())
    }

    pub fn icons(&self) -> &IconSet {
        &self.icons
    }

    pub fn update_time(&self) -> String {
        let text = format_time(&self.clock.now());
        self.targets.set_text(TargetId::Time, &text);
        text
    }

    pub fn update_date(&self) -> String {
        let text = format_date(&self.clock.now());
        self.targets.set_text(TargetId::Date, &text);
        text
    }

    pub fn update_season(&self) -> Result<Season, InvalidInput> {
        let season = classify_season(self.clock.now().month())?;
        let source = self.icons.image_source(season.image_file());
        self.targets.set_image_source(TargetId::SeasonImage, &source);
        Ok(season)
    }

    /// Fetch live weather, falling back to a mock draw when the fetch fails.
    ///
    /// The weather image always ends up pointing at one of the icon files.
    pub async fn update_weather(&self) -> WeatherUpdate {
        let now = self.clock.now();

        let reading = match self.provider.fetch_weather_code().await {
            Ok(code) => WeatherReading::Coded(code),
            Err(err) => {
                debug!(error = %err, "live weather unavailable, using mock weather");
                WeatherReading::Mock(self.mock_condition(now.month(), now.hour()))
            }
        };

        self.show_reading(reading, now.month())
    }

    /// Classify a reading for the given month and write the icon.
    pub fn show_reading(&self, reading: WeatherReading, month: u32) -> WeatherUpdate {
        let season = classify_season(month).unwrap_or_else(|err| {
            error!(error = %err, "cannot classify season for weather icon");
            Season::Summer
        });

        let icon = self.icons.classify(&reading, season);
        let image_source = self.icons.image_source(icon.file_name());
        self.targets.set_image_source(TargetId::WeatherImage, &image_source);

        debug!(%reading, %season, icon = icon.file_name(), "weather icon updated");

        WeatherUpdate { reading, season, icon, image_source }
    }

    fn mock_condition(&self, month: u32, hour: u32) -> MockCondition {
        let mut mock = self.mock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        mock.condition(month, hour).unwrap_or_else(|err| {
            error!(error = %err, "mock weather rejected the current instant");
            MockCondition::Clear
        })
    }
}
