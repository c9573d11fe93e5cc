use anyhow::{Context, Result, anyhow, ensure};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{provider::ProviderId, scheduler::Cadence, weather::IconSet};

/// Fixed coordinates the weather is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for Location {
    fn default() -> Self {
        Self { latitude: 40.7128, longitude: -74.006 }
    }
}

/// Remote weather service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherServiceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for WeatherServiceConfig {
    fn default() -> Self {
        Self { base_url: "https://api.open-meteo.com".to_string(), timeout_secs: 10 }
    }
}

impl WeatherServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Refresh periods, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub time_secs: u64,
    pub date_secs: u64,
    pub season_secs: u64,
    pub weather_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { time_secs: 1, date_secs: 3600, season_secs: 3600, weather_secs: 1800 }
    }
}

impl RefreshConfig {
    pub fn cadence(&self) -> Cadence {
        Cadence {
            time: Duration::from_secs(self.time_secs),
            date: Duration::from_secs(self.date_secs),
            season: Duration::from_secs(self.season_secs),
            weather: Duration::from_secs(self.weather_secs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Fixed seed for reproducible mock weather; random when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Provider id, e.g. "open-meteo" or "offline"; Open-Meteo when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,
    pub location: Location,
    pub weather: WeatherServiceConfig,
    pub icons: IconSet,
    pub refresh: RefreshConfig,
    pub mock: MockConfig,
}

impl Config {
    /// Return the default provider as a strongly-typed ProviderId.
    pub fn default_provider_id(&self) -> Result<ProviderId> {
        let Some(s) = self.default_provider.as_deref() else {
            return Ok(ProviderId::OpenMeteo);
        };

        ProviderId::try_from(s).with_context(|| {
            format!(
                "Invalid default provider '{s}'.\n\
                 Hint: run `grove configure` or set `default_provider = \"open-meteo\"`."
            )
        })
    }

    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    /// Reject values the widgets cannot run with.
    pub fn validate(&self) -> Result<()> {
        let Location { latitude, longitude } = self.location;
        ensure!((-90.0..=90.0).contains(&latitude), "latitude {latitude} is outside -90..=90");
        ensure!(
            (-180.0..=180.0).contains(&longitude),
            "longitude {longitude} is outside -180..=180"
        );
        ensure!(self.weather.timeout_secs > 0, "weather.timeout_secs must be positive");

        let refresh = self.refresh;
        for (name, secs) in [
            ("time_secs", refresh.time_secs),
            ("date_secs", refresh.date_secs),
            ("season_secs", refresh.season_secs),
            ("weather_secs", refresh.weather_secs),
        ] {
            ensure!(secs > 0, "refresh.{name} must be positive");
        }

        Ok(())
    }

    /// Load config from the platform location, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform location, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "grove", "grove")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
