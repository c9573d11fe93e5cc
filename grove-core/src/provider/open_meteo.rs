use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::{Config, Location},
    error::FetchError,
};

use super::WeatherProvider;

/// Current-conditions lookup against the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    location: Location,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: impl Into<String>, location: Location, http: Client) -> Self {
        Self { base_url: base_url.into(), location, http }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.weather.timeout())
            .build()
            .context("Failed to build HTTP client for Open-Meteo")?;

        Ok(Self::new(config.weather.base_url.clone(), config.location, http))
    }

    fn forecast_url(&self) -> String {
        format!("{}/v1/forecast", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    weather_code: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current: Option<OmCurrent>,
}

/// Pull `current.weather_code` out of a forecast response body.
pub fn parse_weather_code(body: &str) -> Result<u16, FetchError> {
    let parsed: OmResponse = serde_json::from_str(body)?;

    parsed.current.and_then(|c| c.weather_code).ok_or(FetchError::MissingCode)
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn fetch_weather_code(&self) -> Result<u16, FetchError> {
        let res = self
            .http
            .get(self.forecast_url())
            .query(&[
                ("latitude", self.location.latitude.to_string()),
                ("longitude", self.location.longitude.to_string()),
                ("current", "weather_code".to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let code = parse_weather_code(&body)?;
        debug!(code, "fetched current weather code");

        Ok(code)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
