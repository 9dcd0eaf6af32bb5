use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    error::WeatherError,
    model::{CurrentWeatherResponse, ForecastResponse},
};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OpenWeatherBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<OpenWeatherProvider, WeatherError> {
        let http = Client::builder().timeout(self.timeout).build()?;

        Ok(OpenWeatherProvider {
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

impl OpenWeatherProvider {
    pub fn builder(api_key: String) -> OpenWeatherBuilder {
        OpenWeatherBuilder {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// GET `{base_url}/{endpoint}` for a city in metric units.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        city: &str,
    ) -> Result<Option<T>, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(endpoint, city, "requesting OpenWeather");

        let res = match self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                // The URL carries the key in its query string.
                tracing::warn!(endpoint, error = %e.without_url(), "OpenWeather request failed");
                return Ok(None);
            }
        };

        let status = res.status();
        if status != StatusCode::OK {
            tracing::warn!(endpoint, %status, "OpenWeather returned non-success status");
            return Ok(None);
        }

        let body = match res.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(endpoint, error = %e.without_url(), "Failed to read OpenWeather body");
                return Ok(None);
            }
        };

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| WeatherError::parse(label(endpoint), e))
    }
}

fn label(endpoint: &str) -> &'static str {
    match endpoint {
        "weather" => "current weather",
        _ => "forecast",
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherProvider {
    async fn fetch_current(
        &self,
        city: &str,
    ) -> Result<Option<CurrentWeatherResponse>, WeatherError> {
        self.get_json("weather", city).await
    }

    async fn fetch_forecast(&self, city: &str) -> Result<Option<ForecastResponse>, WeatherError> {
        self.get_json("forecast", city).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let p = OpenWeatherProvider::builder("KEY".into()).build().unwrap();
        assert_eq!(p.base_url, DEFAULT_BASE_URL);
        assert_eq!(p.api_key, "KEY");
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let p = OpenWeatherProvider::builder("KEY".into())
            .base_url("http://127.0.0.1:9/data/2.5/")
            .build()
            .unwrap();
        assert_eq!(p.base_url, "http://127.0.0.1:9/data/2.5");
    }

    #[test]
    fn endpoint_labels() {
        assert_eq!(label("weather"), "current weather");
        assert_eq!(label("forecast"), "forecast");
    }
}
