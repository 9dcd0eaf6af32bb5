//! Append-only JSON log of past queries.
//!
//! The file holds one top-level array of [`LogRecord`]s. Every append reads the
//! whole array, pushes the new record and rewrites the file. There is no
//! locking: only one process may write a given log at a time.

use std::{fs, io::ErrorKind, path::Path};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::{error::WeatherError, model::LogRecord};

/// Reads every record in the log. A missing file is an empty log.
pub fn load(path: &Path) -> Result<Vec<LogRecord>, WeatherError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(WeatherError::LogRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&contents).map_err(|source| WeatherError::LogFormat {
        path: path.to_path_buf(),
        source,
    })
}

/// Appends `record` after all existing entries and rewrites the file.
pub fn append(record: LogRecord, path: &Path) -> Result<(), WeatherError> {
    let mut records = load(path)?;
    records.push(record);

    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records
        .serialize(&mut ser)
        .map_err(|source| WeatherError::LogFormat {
            path: path.to_path_buf(),
            source,
        })?;

    fs::write(path, buf).map_err(|source| WeatherError::LogWrite {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), records = records.len(), "weather log updated");
    Ok(())
}
