//! Content compositor: forecast plus display context in, visual documents out.
//!
//! Every function here is pure. Missing forecast entries surface as
//! [`ComposeError::MissingData`] instead of a panic so the caller decides
//! whether to skip the category.

mod context;
mod current;
mod daily;
mod details;
mod hourly;

pub use context::DisplayContext;

use feels_weather::{DayPoint, Forecast, HourPoint};

use crate::document::{TileCategory, TileContent, TileSize, VisualDocument};

/// Leading spacer of the current-conditions row
pub const SPACER_WEIGHT: u32 = 5;
/// Condition icon column
pub const ICON_WEIGHT: u32 = 25;
/// Temperature and clock column
pub const TEMPERATURE_WEIGHT: u32 = 30;
/// Summary and town column
pub const SUMMARY_WEIGHT: u32 = 40;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    #[error("forecast has no {series} entry at index {index}")]
    MissingData { series: &'static str, index: usize },
    #[error("{category:?} tiles have no {size:?} layout")]
    UnsupportedSize {
        size: TileSize,
        category: TileCategory,
    },
}

pub(crate) fn hour(forecast: &Forecast, index: usize) -> Result<&HourPoint, ComposeError> {
    forecast.hourly.get(index).ok_or(ComposeError::MissingData {
        series: "hourly",
        index,
    })
}

pub(crate) fn day(forecast: &Forecast, index: usize) -> Result<&DayPoint, ComposeError> {
    forecast.daily.get(index).ok_or(ComposeError::MissingData {
        series: "daily",
        index,
    })
}

/// Lays out one category at one size
pub fn compose(
    forecast: &Forecast,
    ctx: &DisplayContext,
    size: TileSize,
    category: TileCategory,
) -> Result<VisualDocument, ComposeError> {
    match (category, size) {
        (TileCategory::Current, _) => current::compose(forecast, ctx, size),
        (TileCategory::CurrentDetails, TileSize::Medium | TileSize::Wide) => {
            details::compose(forecast, ctx, size)
        }
        (TileCategory::Hourly, TileSize::Medium | TileSize::Wide | TileSize::Large) => {
            hourly::compose(forecast, ctx, size)
        }
        (TileCategory::Daily, TileSize::Medium | TileSize::Wide | TileSize::Large) => {
            daily::compose(forecast, ctx, size)
        }
        _ => Err(ComposeError::UnsupportedSize { size, category }),
    }
}

/// Lays out every size a category supports
pub fn compose_content(
    forecast: &Forecast,
    ctx: &DisplayContext,
    category: TileCategory,
) -> Result<TileContent, ComposeError> {
    let documents = category
        .sizes()
        .iter()
        .map(|&size| compose(forecast, ctx, size, category))
        .collect::<Result<Vec<_>, _>>()?;

    let lock_detailed_status = match category {
        TileCategory::Current => Some(current::detailed_status(forecast, ctx)?),
        _ => None,
    };

    Ok(TileContent {
        category,
        lock_detailed_status,
        documents,
    })
}

/// The four categories in queue order
pub fn compose_all(
    forecast: &Forecast,
    ctx: &DisplayContext,
) -> Result<Vec<TileContent>, ComposeError> {
    TileCategory::ALL
        .iter()
        .map(|&category| compose_content(forecast, ctx, category))
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};
    use feels_weather::{
        Condition, Currently, DataBlock, DayPoint, Forecast, HourPoint, PrecipitationType,
    };

    pub const START: i64 = 1_700_000_000;

    pub fn now() -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(3600).unwrap();
        Utc.timestamp_opt(START, 0).unwrap().with_timezone(&offset)
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    /// Forecast with `hours` hourly points (apparent temperature = index) and
    /// `days` daily points (apparent max = 20 + index, min = index)
    pub fn forecast(hours: usize, days: usize) -> Forecast {
        let hourly = (0..hours)
            .map(|i| HourPoint {
                time: at(START + i as i64 * 3600),
                icon: Condition::Cloudy,
                temperature: i as f64,
                apparent_temperature: i as f64 + 0.5,
                precip_probability: 0.0,
            })
            .collect();
        let daily = (0..days)
            .map(|i| DayPoint {
                time: at(START + i as i64 * 86_400),
                summary: format!("Day {i}"),
                icon: Condition::Rain,
                temperature_max: 20.4,
                temperature_min: 8.6,
                apparent_temperature_max: if i == 0 { 18.2 } else { 20.0 + i as f64 },
                apparent_temperature_min: if i == 0 { 9.9 } else { i as f64 },
                moon_phase: 0.5,
                precip_probability: 0.1,
            })
            .collect();

        Forecast {
            latitude: 48.85,
            longitude: 2.35,
            timezone: Some("Europe/Paris".into()),
            currently: Currently {
                time: at(START),
                summary: "Light Rain".into(),
                icon: Condition::Rain,
                temperature: 16.4,
                apparent_temperature: 15.7,
                wind_speed: 3.5,
                wind_bearing: 230.0,
                humidity: 0.81,
                cloud_cover: 0.95,
                precip_probability: 0.7,
                precip_type: Some(PrecipitationType::Rain),
            },
            hourly: DataBlock::new(hourly),
            daily: DataBlock::new(daily),
        }
    }
}
