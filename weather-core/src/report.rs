//! Human-readable console report.

use std::io::{self, Write};

use crate::model::{CurrentWeather, DailySummary};

/// Forecast days shown in the report.
pub const FORECAST_DAYS: usize = 5;

const RULE: &str = "----------------------------";

/// What a piece of text is, so a [`Painter`] can style it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Heading,
    Rule,
    Field,
    Date,
    Temperature,
    Condition,
    Prompt,
    Error,
}

/// Styling capability handed to the renderer.
pub trait Painter {
    fn paint(&self, role: Role, text: &str) -> String;
}

/// Leaves text as is. Used when output is not a terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct Plain;

impl Painter for Plain {
    fn paint(&self, _role: Role, text: &str) -> String {
        text.to_string()
    }
}

/// ANSI colours.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ansi;

impl Painter for Ansi {
    fn paint(&self, role: Role, text: &str) -> String {
        let code = match role {
            Role::Heading => "36",
            Role::Rule => "33",
            Role::Field => "32",
            Role::Date => "35",
            Role::Temperature => "34",
            Role::Condition => "93",
            Role::Prompt => "37",
            Role::Error => "31",
        };
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

/// Formats a float the way the log stores it: always at least one decimal.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// `Label: value` pairs of the current-weather block, in display order.
pub fn current_fields(current: &CurrentWeather) -> [(&'static str, String); 6] {
    [
        ("City", current.city.clone()),
        ("Temperature (°C)", format_number(current.temperature_c)),
        ("Weather", current.description.clone()),
        ("Humidity (%)", current.humidity_pct.to_string()),
        ("Wind Speed (m/s)", format_number(current.wind_speed_mps)),
        ("Date & Time", current.observed_at.clone()),
    ]
}

/// Writes the current conditions and up to [`FORECAST_DAYS`] forecast days.
pub fn render<W: Write + ?Sized, P: Painter + ?Sized>(
    out: &mut W,
    painter: &P,
    current: &CurrentWeather,
    forecast: &[DailySummary],
) -> io::Result<()> {
    writeln!(out, "{}", painter.paint(Role::Heading, "\n🌤️ CURRENT WEATHER"))?;
    writeln!(out, "{}", painter.paint(Role::Rule, RULE))?;
    for (label, value) in current_fields(current) {
        writeln!(out, "{}", painter.paint(Role::Field, &format!("{label}: {value}")))?;
    }
    writeln!(out, "{}", painter.paint(Role::Rule, RULE))?;

    writeln!(out, "{}", painter.paint(Role::Heading, "\n📅 5-DAY FORECAST"))?;
    writeln!(out, "{}", painter.paint(Role::Rule, RULE))?;
    for day in forecast.iter().take(FORECAST_DAYS) {
        writeln!(
            out,
            "{}{}{}",
            painter.paint(Role::Date, &format!("{}: ", day.date)),
            painter.paint(Role::Temperature, &format!("{}°C, ", format_number(day.avg_temp_c))),
            painter.paint(Role::Condition, &day.main_weather),
        )?;
    }
    writeln!(out, "{}", painter.paint(Role::Rule, RULE))?;

    Ok(())
}
