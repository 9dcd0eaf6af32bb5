//! Interactive prompt loop: read a city, fetch, report, log, repeat.

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use chrono::Local;

use crate::{
    error::WeatherError,
    history,
    model::{CurrentWeather, LogRecord},
    provider::WeatherSource,
    report::{self, Painter, Role},
    summary,
};

/// Input that ends the session, compared case-insensitively.
pub const EXIT_COMMAND: &str = "exit";

const FETCH_FAILED: &str = "❌ Error: Could not fetch weather data. Check city name or API key.";

/// What happened to one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Exit,
    Skipped,
    FetchFailed,
    ParseFailed,
    Reported,
}

pub struct Session<'a, S: WeatherSource + ?Sized, P: Painter + ?Sized> {
    source: &'a S,
    painter: &'a P,
    log_path: PathBuf,
}

impl<'a, S: WeatherSource + ?Sized, P: Painter + ?Sized> Session<'a, S, P> {
    pub fn new(source: &'a S, painter: &'a P, log_path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            painter,
            log_path: log_path.into(),
        }
    }

    /// Runs until `exit` or end of input. Log and output failures end the session.
    pub async fn run<R: BufRead, W: Write + ?Sized>(
        &self,
        mut input: R,
        out: &mut W,
    ) -> Result<(), WeatherError> {
        writeln!(
            out,
            "{}",
            self.painter
                .paint(Role::Heading, "\n🌦️ Welcome to the Weather CLI App (5-Day Forecast Edition)")
        )?;
        writeln!(out, "{}", self.painter.paint(Role::Rule, "Type 'exit' anytime to quit.\n"))?;

        let mut line = String::new();
        loop {
            write!(out, "{}", self.painter.paint(Role::Prompt, "Enter city name: "))?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                tracing::debug!("end of input");
                writeln!(out)?;
                self.goodbye(out)?;
                return Ok(());
            }

            let city = line.trim_end_matches(['\n', '\r']);
            if self.handle(city, out).await? == Outcome::Exit {
                return Ok(());
            }
        }
    }

    /// Processes one line of input.
    pub async fn handle<W: Write + ?Sized>(
        &self,
        input: &str,
        out: &mut W,
    ) -> Result<Outcome, WeatherError> {
        if input.to_lowercase() == EXIT_COMMAND {
            self.goodbye(out)?;
            return Ok(Outcome::Exit);
        }
        if input.trim().is_empty() {
            return Ok(Outcome::Skipped);
        }

        match self.query(input).await {
            Ok(Some(record)) => {
                report::render(out, self.painter, &record.current, &record.forecast)?;
                history::append(record, &self.log_path)?;
                Ok(Outcome::Reported)
            }
            Ok(None) => {
                writeln!(out, "{}", self.painter.paint(Role::Error, FETCH_FAILED))?;
                Ok(Outcome::FetchFailed)
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(error = %e, city = input, "discarding unexpected response");
                writeln!(out, "{}", self.painter.paint(Role::Error, &format!("❌ Error: {e}")))?;
                Ok(Outcome::ParseFailed)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetches current weather then the forecast. `None` if either fetch failed.
    async fn query(&self, city: &str) -> Result<Option<LogRecord>, WeatherError> {
        let current = self.source.fetch_current(city).await?;
        let forecast = self.source.fetch_forecast(city).await?;

        let (Some(current), Some(forecast)) = (current, forecast) else {
            return Ok(None);
        };

        Ok(Some(LogRecord {
            current: CurrentWeather::from_response(&current, Local::now())?,
            forecast: summary::summarize(&forecast)?,
        }))
    }

    fn goodbye<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), WeatherError> {
        writeln!(out, "{}", self.painter.paint(Role::Heading, "👋 Goodbye! Stay weather-smart.\n"))?;
        Ok(())
    }
}
