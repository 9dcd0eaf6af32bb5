use crate::{
    Config,
    error::WeatherError,
    model::{CurrentWeatherResponse, ForecastResponse},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::OnceLock};

pub mod openweather;

/// Source of raw weather data for a city.
///
/// `Ok(None)` means the fetch failed (network error or a status other than 200).
/// The cause is logged, not returned. `Err` is reserved for a successful answer
/// whose body could not be understood.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_current(
        &self,
        city: &str,
    ) -> Result<Option<CurrentWeatherResponse>, WeatherError>;

    async fn fetch_forecast(&self, city: &str) -> Result<Option<ForecastResponse>, WeatherError>;
}

/// Construct the OpenWeather source from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let provider = OpenWeatherProvider::builder(config.api_key()?.to_owned())
        .base_url(config.base_url())
        .timeout(config.timeout())
        .build()?;

    Ok(Box::new(provider))
}

/// Builds the source from config on the first fetch, so a session can start
/// and `exit` before an API key is configured.
#[derive(Debug)]
pub struct LazySource {
    config: Config,
    inner: OnceLock<Box<dyn WeatherSource>>,
}

impl LazySource {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            inner: OnceLock::new(),
        }
    }

    fn get(&self) -> Result<&dyn WeatherSource, WeatherError> {
        if let Some(source) = self.inner.get() {
            return Ok(source.as_ref());
        }

        let source =
            source_from_config(&self.config).map_err(|e| WeatherError::Config(format!("{e:#}")))?;
        tracing::debug!("weather source initialized");

        Ok(self.inner.get_or_init(|| source).as_ref())
    }
}

#[async_trait]
impl WeatherSource for LazySource {
    async fn fetch_current(
        &self,
        city: &str,
    ) -> Result<Option<CurrentWeatherResponse>, WeatherError> {
        self.get()?.fetch_current(city).await
    }

    async fn fetch_forecast(&self, city: &str) -> Result<Option<ForecastResponse>, WeatherError> {
        self.get()?.fetch_forecast(city).await
    }
}
