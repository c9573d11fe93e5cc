use crate::{
    Config,
    error::FetchError,
    provider::{offline::OfflineProvider, open_meteo::OpenMeteoProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod offline;
pub mod open_meteo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenMeteo,
    Offline,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenMeteo => "open-meteo",
            ProviderId::Offline => "offline",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenMeteo, ProviderId::Offline]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "open-meteo" | "openmeteo" => Ok(ProviderId::OpenMeteo),
            "offline" => Ok(ProviderId::Offline),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: open-meteo, offline."
            )),
        }
    }
}

/// Source of the live weather code for the configured location.
///
/// A failed fetch is an expected outcome; callers fall back to mock weather.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather_code(&self) -> Result<u16, FetchError>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::OpenMeteo => Box::new(OpenMeteoProvider::from_config(config)?),
        ProviderId::Offline => Box::new(OfflineProvider),
    };

    Ok(boxed)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("openweather").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn default_provider_from_config_errors_on_unknown_name() {
        let cfg = Config { default_provider: Some("weatherapi".into()), ..Config::default() };
        let err = default_provider_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("Invalid default provider 'weatherapi'"));
        assert!(msg.contains("Hint: run `grove configure"));
    }

    #[test]
    fn default_provider_from_config_works_with_defaults() {
        let provider = default_provider_from_config(&Config::default());
        assert!(provider.is_ok());
    }

    #[tokio::test]
    async fn offline_provider_from_config_always_fails() {
        let provider = provider_from_config(ProviderId::Offline, &Config::default())
            .expect("offline provider needs no settings");

        let err = provider.fetch_weather_code().await.unwrap_err();
        assert!(matches!(err, FetchError::Offline));
    }
}
