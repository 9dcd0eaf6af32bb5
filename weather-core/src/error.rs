use std::path::PathBuf;

/// Errors surfaced by the core library.
///
/// A failed fetch (transport error or a non-200 status) is not represented here:
/// sources report it as `Ok(None)` so the caller can show one generic message.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The provider answered 200 but the body did not have the expected shape.
    #[error("Unexpected {what} response: {reason}")]
    Parse { what: &'static str, reason: String },

    #[error("Failed to read weather log {}: {source}", .path.display())]
    LogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Weather log {} is not a JSON array of records: {source}", .path.display())]
    LogFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write weather log {}: {source}", .path.display())]
    LogWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The source could not be set up, e.g. no API key.
    #[error("{0}")]
    Config(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl WeatherError {
    pub(crate) fn parse(what: &'static str, reason: impl ToString) -> Self {
        WeatherError::Parse {
            what,
            reason: reason.to_string(),
        }
    }

    /// True for errors the interactive loop reports and moves past.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, WeatherError::Parse { .. })
    }
}
