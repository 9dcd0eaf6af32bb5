use std::io::{self, IsTerminal};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weather_core::{
    Config, LazySource, Session,
    report::{Ansi, Painter, Plain},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Current weather and a 5-day forecast for any city"
)]
pub struct Cli {
    /// Without a subcommand, starts the interactive prompt.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            None => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    let path = Config::config_file_path()?;
    tracing::info!(path = %path.display(), "API key saved");
    println!("Saved API key to {}", path.display());
    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?.with_env();
    let log_file = config.log_file();
    let color = use_color();
    tracing::debug!(log_file = %log_file.display(), color, "starting interactive session");

    // Built on the first query, so `exit` works before a key is configured.
    let source = LazySource::new(config);
    let painter: &dyn Painter = if color { &Ansi } else { &Plain };
    let session = Session::new(&source, painter, log_file);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout).await?;

    Ok(())
}

fn use_color() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}
