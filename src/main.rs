//! Feels command line: compose tile content, run the tile task, map tile ids.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use feels_core::{App, AppError};
use feels_tasks::{Preferences, PrimaryTileTask};
use feels_tiles::{
    compose, compose_all, compose_content, DisplayContext, JsonDirectorySink, TileCategory,
    TileDesigner, TileSize,
};
use feels_weather::{
    DarkSkyProvider, FixedGeolocator, Forecast, Language, MeasurementSystem, NominatimResolver,
};
use tokio_util::sync::CancellationToken;

#[derive(Parser, Debug)]
#[command(name = "feels")]
#[command(about = "Live tile content for the Feels weather app")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose tile documents from a forecast file and print them as JSON
    Compose {
        /// Forecast in the Dark Sky JSON shape
        #[arg(long)]
        forecast: PathBuf,

        /// current, details, hourly or daily (default: all four)
        #[arg(long, value_parser = parse_category)]
        category: Option<TileCategory>,

        /// small, medium, wide or large (default: every supported size)
        #[arg(long, value_parser = parse_size, requires = "category")]
        size: Option<TileSize>,

        #[arg(long, default_value = "")]
        town: String,

        /// us, si, ca, uk, uk2 or auto
        #[arg(long, default_value = "us")]
        units: String,

        /// Language tag such as en-US or fr-FR
        #[arg(long, default_value = "en")]
        language: String,
    },

    /// Refresh the primary tile once using the configured provider
    Update,

    /// Map between location names and secondary tile ids
    TileId {
        #[command(subcommand)]
        action: TileIdAction,
    },
}

#[derive(Subcommand, Debug)]
enum TileIdAction {
    Encode { name: String },
    Decode { id: String },
}

fn parse_category(value: &str) -> Result<TileCategory, String> {
    match value.to_ascii_lowercase().as_str() {
        "current" => Ok(TileCategory::Current),
        "details" | "currentdetails" | "current-details" => Ok(TileCategory::CurrentDetails),
        "hourly" => Ok(TileCategory::Hourly),
        "daily" => Ok(TileCategory::Daily),
        other => Err(format!("unknown tile category '{other}'")),
    }
}

fn parse_size(value: &str) -> Result<TileSize, String> {
    TileSize::ALL
        .into_iter()
        .find(|s| s.name().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("unknown tile size '{value}'"))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_compose(
    path: &Path,
    category: Option<TileCategory>,
    size: Option<TileSize>,
    ctx: &DisplayContext,
) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read forecast from {}", path.display()))?;
    let forecast: Forecast = serde_json::from_str(&raw).context("Failed to parse forecast")?;

    match (category, size) {
        (Some(category), Some(size)) => print_json(&compose(&forecast, ctx, size, category)?),
        (Some(category), None) => print_json(&compose_content(&forecast, ctx, category)?),
        (None, _) => print_json(&compose_all(&forecast, ctx)?),
    }
}

async fn run_update() -> Result<()> {
    let mut app = App::new()?;
    app.initialize()?;
    let config = app.shared_config();

    if !config.weather.has_api_key() {
        bail!("No forecast API key configured in the [weather] section");
    }

    let provider = DarkSkyProvider::from_config(&config.weather)?;
    let sink = JsonDirectorySink::new(config.tiles.output_dir.clone());
    let designer =
        TileDesigner::new(Arc::new(sink)).with_notification_queue(config.tiles.notification_queue);
    let task = PrimaryTileTask::new(
        Preferences::new(app.settings()),
        Arc::new(provider),
        Arc::new(NominatimResolver::from_config(&config.geocoding)),
        Arc::new(FixedGeolocator::new(config.location.position())),
        designer,
    );

    tracing::info!("Running primary tile task");
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let result = task.run(&cancel).await;
    app.shutdown()?;

    match result {
        Ok(outcome) => {
            println!("{outcome:?}");
            Ok(())
        }
        Err(e) => {
            let err = AppError::from(e);
            eprintln!("{}", err.user_message());
            Err(err.into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    feels_core::init()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Compose {
            forecast,
            category,
            size,
            town,
            units,
            language,
        } => {
            let ctx = DisplayContext::local_now()
                .town(town)
                .units(MeasurementSystem::from_setting(&units))
                .language(Language::from_tag(&language));
            run_compose(&forecast, category, size, &ctx)
        }
        Command::Update => run_update().await,
        Command::TileId { action } => {
            match action {
                TileIdAction::Encode { name } => println!("{}", feels_tiles::encode(&name)),
                TileIdAction::Decode { id } => println!("{}", feels_tiles::decode(&id)),
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_categories_and_sizes() {
        assert_eq!(parse_category("Details"), Ok(TileCategory::CurrentDetails));
        assert_eq!(parse_size("WIDE"), Ok(TileSize::Wide));
        assert!(parse_size("huge").is_err());
    }

    #[test]
    fn cli_requires_category_for_size() {
        let parsed =
            Cli::try_parse_from(["feels", "compose", "--forecast", "f.json", "--size", "wide"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "feels", "compose", "--forecast", "f.json", "--category", "hourly", "--size", "wide",
        ])
        .unwrap();
        assert!(matches!(
            parsed.command,
            Command::Compose {
                category: Some(TileCategory::Hourly),
                size: Some(TileSize::Wide),
                ..
            }
        ));
    }
}
