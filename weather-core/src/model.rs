use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Format used for the "Date & Time" field of a current-weather snapshot.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Provider schemas. Only the fields we consume are declared; anything else in
// the body is ignored, anything missing fails decoding.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// Body of the current-weather endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    pub name: String,
    pub main: CurrentMain,
    pub weather: Vec<Condition>,
    pub wind: Wind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
}

/// One 3-hour reading of the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Local provider time, `YYYY-MM-DD HH:MM:SS`.
    pub dt_txt: String,
    pub main: ForecastMain,
    pub weather: Vec<Condition>,
}

impl ForecastEntry {
    /// Calendar day of the reading: everything before the first space.
    pub fn date(&self) -> &str {
        self.dt_txt.split(' ').next().unwrap_or_default()
    }

    pub fn description(&self) -> Result<&str, WeatherError> {
        self.weather
            .first()
            .map(|c| c.description.as_str())
            .ok_or_else(|| {
                WeatherError::parse("forecast", format!("entry {} has no weather", self.dt_txt))
            })
    }
}

/// Body of the 5-day / 3-hour forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastEntry>,
}

/// Current conditions as shown to the user and stored in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Temperature (°C)")]
    pub temperature_c: f64,
    #[serde(rename = "Weather")]
    pub description: String,
    #[serde(rename = "Humidity (%)")]
    pub humidity_pct: u8,
    #[serde(rename = "Wind Speed (m/s)")]
    pub wind_speed_mps: f64,
    #[serde(rename = "Date & Time")]
    pub observed_at: String,
}

impl CurrentWeather {
    pub fn from_response(
        response: &CurrentWeatherResponse,
        observed_at: DateTime<Local>,
    ) -> Result<Self, WeatherError> {
        let condition = response
            .weather
            .first()
            .ok_or_else(|| WeatherError::parse("current weather", "weather list is empty"))?;

        Ok(Self {
            city: response.name.clone(),
            temperature_c: response.main.temp,
            description: title_case(&condition.description),
            humidity_pct: response.main.humidity,
            wind_speed_mps: response.wind.speed,
            observed_at: observed_at.format(TIMESTAMP_FORMAT).to_string(),
        })
    }
}

/// Aggregate of one calendar day of forecast readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Avg Temp (°C)")]
    pub avg_temp_c: f64,
    #[serde(rename = "Main Weather")]
    pub main_weather: String,
}

/// One entry of the persisted weather log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "Current")]
    pub current: CurrentWeather,
    #[serde(rename = "Forecast")]
    pub forecast: Vec<DailySummary>,
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}
