use async_trait::async_trait;

use crate::error::FetchError;

use super::WeatherProvider;

/// Never reaches the network; every tick uses mock weather.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProvider;

#[async_trait]
impl WeatherProvider for OfflineProvider {
    async fn fetch_weather_code(&self) -> Result<u16, FetchError> {
        Err(FetchError::Offline)
    }
}
