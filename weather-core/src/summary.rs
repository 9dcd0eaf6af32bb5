//! Reduces 3-hour forecast readings to one summary per calendar day.

use crate::{
    error::WeatherError,
    model::{DailySummary, ForecastResponse, title_case},
};

/// Readings collected for one day, in arrival order.
#[derive(Debug, Default)]
struct DayReadings {
    temps: Vec<f64>,
    descriptions: Vec<String>,
}

impl DayReadings {
    fn average(&self) -> f64 {
        let sum: f64 = self.temps.iter().sum();
        round_one_decimal(sum / self.temps.len() as f64)
    }

    /// Most frequent description; on a tie the one seen first wins.
    fn modal_description(&self) -> String {
        let mut best: Option<(&str, usize)> = None;

        for desc in &self.descriptions {
            let count = self.descriptions.iter().filter(|d| *d == desc).count();
            if best.is_none_or(|(_, n)| count > n) {
                best = Some((desc, count));
            }
        }

        best.map(|(d, _)| d.to_string()).unwrap_or_default()
    }
}

/// Groups readings by the date part of `dt_txt`, keeping days in the order they
/// first appear. The result is not truncated.
pub fn summarize(forecast: &ForecastResponse) -> Result<Vec<DailySummary>, WeatherError> {
    let mut days: Vec<(String, DayReadings)> = Vec::new();

    for entry in &forecast.list {
        let date = entry.date();
        let description = title_case(entry.description()?);

        let idx = match days.iter().position(|(d, _)| d == date) {
            Some(idx) => idx,
            None => {
                days.push((date.to_string(), DayReadings::default()));
                days.len() - 1
            }
        };

        let readings = &mut days[idx].1;
        readings.temps.push(entry.main.temp);
        readings.descriptions.push(description);
    }

    tracing::debug!(entries = forecast.list.len(), days = days.len(), "forecast summarized");

    Ok(days
        .into_iter()
        .map(|(date, readings)| DailySummary {
            avg_temp_c: readings.average(),
            main_weather: readings.modal_description(),
            date,
        })
        .collect())
}

/// Rounds on the exact decimal value, ties to even: 2.25 -> 2.2, 2.75 -> 2.8.
fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, ForecastEntry, ForecastMain};

    fn entry(dt_txt: &str, temp: f64, description: &str) -> ForecastEntry {
        ForecastEntry {
            dt_txt: dt_txt.to_string(),
            main: ForecastMain { temp },
            weather: vec![Condition {
                description: description.to_string(),
            }],
        }
    }

    fn forecast(list: Vec<ForecastEntry>) -> ForecastResponse {
        ForecastResponse { list }
    }

    #[test]
    fn single_day_yields_single_summary() {
        let f = forecast(vec![
            entry("2024-05-01 00:00:00", 10.0, "clear sky"),
            entry("2024-05-01 03:00:00", 11.0, "clear sky"),
            entry("2024-05-01 06:00:00", 12.5, "few clouds"),
        ]);

        let days = summarize(&f).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, "2024-05-01");
        assert_eq!(days[0].avg_temp_c, 11.2);
        assert_eq!(days[0].main_weather, "Clear Sky");
    }

    #[test]
    fn six_days_are_not_truncated() {
        let list = (1..=6)
            .map(|d| entry(&format!("2024-05-0{d} 12:00:00"), d as f64, "rain"))
            .collect();

        let days = summarize(&forecast(list)).unwrap();
        assert_eq!(days.len(), 6);
        assert_eq!(days[5].date, "2024-05-06");
    }

    #[test]
    fn days_keep_first_appearance_order() {
        let f = forecast(vec![
            entry("2024-05-02 21:00:00", 1.0, "rain"),
            entry("2024-05-01 00:00:00", 2.0, "rain"),
            entry("2024-05-02 00:00:00", 3.0, "rain"),
        ]);

        let dates: Vec<_> = summarize(&f).unwrap().into_iter().map(|d| d.date).collect();
        assert_eq!(dates, ["2024-05-02", "2024-05-01"]);
    }

    #[test]
    fn higher_count_wins() {
        let f = forecast(vec![
            entry("2024-05-01 00:00:00", 0.0, "Clear"),
            entry("2024-05-01 03:00:00", 0.0, "Rain"),
            entry("2024-05-01 06:00:00", 0.0, "Clear"),
        ]);
        assert_eq!(summarize(&f).unwrap()[0].main_weather, "Clear");
    }

    #[test]
    fn tie_goes_to_first_seen() {
        let f = forecast(vec![
            entry("2024-05-01 00:00:00", 0.0, "Clear"),
            entry("2024-05-01 03:00:00", 0.0, "Rain"),
        ]);
        assert_eq!(summarize(&f).unwrap()[0].main_weather, "Clear");

        let f = forecast(vec![
            entry("2024-05-01 00:00:00", 0.0, "Rain"),
            entry("2024-05-01 03:00:00", 0.0, "Clear"),
            entry("2024-05-01 06:00:00", 0.0, "Clear"),
            entry("2024-05-01 09:00:00", 0.0, "Rain"),
        ]);
        assert_eq!(summarize(&f).unwrap()[0].main_weather, "Rain");
    }

    #[test]
    fn descriptions_are_title_cased_before_counting() {
        let f = forecast(vec![
            entry("2024-05-01 00:00:00", 0.0, "light rain"),
            entry("2024-05-01 03:00:00", 0.0, "overcast clouds"),
            entry("2024-05-01 06:00:00", 0.0, "Light Rain"),
        ]);
        assert_eq!(summarize(&f).unwrap()[0].main_weather, "Light Rain");
    }

    #[test]
    fn average_is_rounded_to_one_decimal() {
        let f = forecast(vec![
            entry("2024-05-01 00:00:00", 1.0, "rain"),
            entry("2024-05-01 03:00:00", 2.0, "rain"),
            entry("2024-05-01 06:00:00", 2.0, "rain"),
        ]);
        assert_eq!(summarize(&f).unwrap()[0].avg_temp_c, 1.7);

        let f = forecast(vec![
            entry("2024-05-01 00:00:00", -3.0, "snow"),
            entry("2024-05-01 03:00:00", -4.0, "snow"),
        ]);
        assert_eq!(summarize(&f).unwrap()[0].avg_temp_c, -3.5);
    }

    #[test]
    fn half_way_averages_round_to_even() {
        let day = |temps: &[f64]| {
            let list = temps
                .iter()
                .map(|t| entry("2024-05-01 00:00:00", *t, "rain"))
                .collect();
            summarize(&forecast(list)).unwrap()[0].avg_temp_c
        };

        assert_eq!(day(&[2.0, 2.5]), 2.2);
        assert_eq!(day(&[-0.25]), -0.2);
        assert_eq!(day(&[2.5, 3.0]), 2.8);
        assert_eq!(day(&[0.15]), 0.1);
        assert_eq!(day(&[2.675]), 2.7);
    }

    #[test]
    fn summarizing_daily_summaries_again_is_stable() {
        let f = forecast(vec![
            entry("2024-05-01 00:00:00", 10.0, "clear sky"),
            entry("2024-05-01 03:00:00", 11.0, "rain"),
            entry("2024-05-01 06:00:00", 12.0, "clear sky"),
            entry("2024-05-02 00:00:00", 7.25, "snow"),
            entry("2024-05-02 03:00:00", 8.0, "snow"),
        ]);
        let first = summarize(&f).unwrap();

        let again = forecast(
            first
                .iter()
                .map(|d| entry(&format!("{} 12:00:00", d.date), d.avg_temp_c, &d.main_weather))
                .collect(),
        );
        assert_eq!(summarize(&again).unwrap(), first);
    }

    #[test]
    fn empty_forecast_yields_nothing() {
        assert!(summarize(&forecast(vec![])).unwrap().is_empty());
    }

    #[test]
    fn entry_without_weather_is_parse_error() {
        let mut bad = entry("2024-05-01 00:00:00", 0.0, "rain");
        bad.weather.clear();

        let err = summarize(&forecast(vec![bad])).unwrap_err();
        assert!(matches!(err, WeatherError::Parse { .. }));
    }
}
