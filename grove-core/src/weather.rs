use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{error::InvalidInput, season::Season};

/// Locally synthesized stand-in for a live reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockCondition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Snow,
    Thunderstorm,
    Mist,
    Fog,
}

impl MockCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            MockCondition::Clear => "clear",
            MockCondition::Clouds => "clouds",
            MockCondition::Rain => "rain",
            MockCondition::Drizzle => "drizzle",
            MockCondition::Snow => "snow",
            MockCondition::Thunderstorm => "thunderstorm",
            MockCondition::Mist => "mist",
            MockCondition::Fog => "fog",
        }
    }

    pub const fn all() -> &'static [MockCondition] {
        &[
            MockCondition::Clear,
            MockCondition::Clouds,
            MockCondition::Rain,
            MockCondition::Drizzle,
            MockCondition::Snow,
            MockCondition::Thunderstorm,
            MockCondition::Mist,
            MockCondition::Fog,
        ]
    }
}

impl fmt::Display for MockCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MockCondition {
    type Err = InvalidInput;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.trim().to_lowercase();

        MockCondition::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| InvalidInput::Condition(value.to_string()))
    }
}

/// Current conditions, either a live provider code (0–99 scheme) or a mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherReading {
    Coded(u16),
    Mock(MockCondition),
}

impl fmt::Display for WeatherReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherReading::Coded(code) => write!(f, "code {code}"),
            WeatherReading::Mock(condition) => write!(f, "mock {condition}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Sun,
    Rain,
    Snow,
    Storm,
    WindSpring,
    WindFall,
}

impl WeatherIcon {
    /// Asset file name; the page ships art under exactly these names.
    pub fn file_name(&self) -> &'static str {
        match self {
            WeatherIcon::Sun => "Sun.png",
            WeatherIcon::Rain => "Rain.png",
            WeatherIcon::Snow => "Snow.png",
            WeatherIcon::Storm => "Storm.png",
            WeatherIcon::WindSpring => "WindSpring.png",
            WeatherIcon::WindFall => "WindFall.png",
        }
    }
}

/// Cloud, overcast and fog show a seasonal wind icon when one exists.
fn wind_icon(season: Season) -> WeatherIcon {
    match season {
        Season::Spring => WeatherIcon::WindSpring,
        Season::Fall => WeatherIcon::WindFall,
        Season::Summer | Season::Winter => WeatherIcon::Sun,
    }
}

/// Pick the icon for a reading in the given season.
///
/// Returns the full icon set; pass the result through [`IconSet::resolve`]
/// when the page has no snow art.
pub fn classify_icon(reading: &WeatherReading, season: Season) -> WeatherIcon {
    match *reading {
        WeatherReading::Coded(code) => match code {
            0..=1 => WeatherIcon::Sun,
            2..=3 | 45 | 46 | 48 => wind_icon(season),
            51..=67 => WeatherIcon::Rain,
            71..=77 => WeatherIcon::Snow,
            80..=82 => WeatherIcon::Rain,
            85..=86 => WeatherIcon::Snow,
            95..=99 => WeatherIcon::Storm,
            _ => WeatherIcon::Sun,
        },
        WeatherReading::Mock(condition) => match condition {
            MockCondition::Rain | MockCondition::Drizzle => WeatherIcon::Rain,
            MockCondition::Snow => WeatherIcon::Snow,
            MockCondition::Thunderstorm => WeatherIcon::Storm,
            MockCondition::Clouds | MockCondition::Mist | MockCondition::Fog => wind_icon(season),
            MockCondition::Clear => WeatherIcon::Sun,
        },
    }
}

/// The icon art available to the hosting page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSet {
    /// Directory the image references are rooted at.
    pub asset_dir: String,

    /// Whether `Snow.png` exists; without it snow shows as rain.
    pub snow: bool,
}

impl Default for IconSet {
    fn default() -> Self {
        Self { asset_dir: "assets".to_string(), snow: true }
    }
}

impl IconSet {
    pub fn resolve(&self, icon: WeatherIcon) -> WeatherIcon {
        match icon {
            WeatherIcon::Snow if !self.snow => WeatherIcon::Rain,
            other => other,
        }
    }

    pub fn classify(&self, reading: &WeatherReading, season: Season) -> WeatherIcon {
        self.resolve(classify_icon(reading, season))
    }

    pub fn image_source(&self, file_name: &str) -> String {
        let dir = self.asset_dir.trim_end_matches('/');
        if dir.is_empty() { file_name.to_string() } else { format!("{dir}/{file_name}") }
    }
}
