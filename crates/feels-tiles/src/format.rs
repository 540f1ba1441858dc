//! Text formatting for tile labels.

use chrono::{DateTime, FixedOffset, Utc};
use feels_weather::{Language, MeasurementSystem};

/// Probabilities below this render as an empty label
pub const PRECIP_THRESHOLD: f64 = 0.05;

/// Whole degrees with a degree mark. Truncates toward zero: 15.7 is "15°",
/// -2.9 is "-2°".
pub fn temperature(value: f64) -> String {
    format!("{}°", value as i32)
}

pub fn percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round() as i64)
}

/// Precipitation probability, empty when negligible
pub fn precip_probability(probability: f64) -> String {
    if probability < PRECIP_THRESHOLD {
        String::new()
    } else {
        percent(probability)
    }
}

pub fn wind_speed(speed: f64, units: MeasurementSystem) -> String {
    format!("{}{}", speed, units.wind_speed_unit())
}

pub fn wind_bearing(bearing: f64) -> String {
    format!("{bearing}°")
}

/// 24-hour clock, e.g. "09:05"
pub fn clock_time(now: &DateTime<FixedOffset>) -> String {
    now.format("%H:%M").to_string()
}

/// Hour of day with an AM/PM suffix and no padding, e.g. "3PM"
pub fn hour_label(time: DateTime<Utc>, offset: &FixedOffset) -> String {
    time.with_timezone(offset).format("%-I%p").to_string()
}

/// Abbreviated weekday in the display language
pub fn weekday_label(time: DateTime<Utc>, offset: &FixedOffset, language: Language) -> String {
    time.with_timezone(offset)
        .format_localized("%a", language.locale())
        .to_string()
}
