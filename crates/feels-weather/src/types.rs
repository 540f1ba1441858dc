use chrono::{DateTime, Utc};
use feels_core::NetworkError;
use serde::{Deserialize, Serialize};

/// Measurement system requested from the forecast service.
///
/// Mirrors the `units` query parameter of Dark Sky compatible APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    #[default]
    Us,
    Si,
    Ca,
    Uk,
    Uk2,
    Auto,
}

impl MeasurementSystem {
    pub const ALL: [MeasurementSystem; 6] = [
        Self::Us,
        Self::Si,
        Self::Ca,
        Self::Uk,
        Self::Uk2,
        Self::Auto,
    ];

    /// Resolve a stored setting value. Unrecognized values fall back to US,
    /// whose wind unit is the documented default label.
    pub fn from_setting(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "us" => Self::Us,
            "si" => Self::Si,
            "ca" => Self::Ca,
            "uk" => Self::Uk,
            "uk2" => Self::Uk2,
            "auto" => Self::Auto,
            _ => Self::Us,
        }
    }

    /// Value of the `units` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Si => "si",
            Self::Ca => "ca",
            Self::Uk => "uk",
            Self::Uk2 => "uk2",
            Self::Auto => "auto",
        }
    }

    /// Unit label appended to wind speeds
    pub fn wind_speed_unit(&self) -> &'static str {
        match self {
            Self::Us | Self::Uk | Self::Uk2 => "miles/h",
            Self::Si | Self::Auto => "m/s",
            Self::Ca => "km/h",
        }
    }
}

/// Display language for forecast summaries and weekday labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    French,
    Russian,
}

impl Language {
    /// Resolve a language tag such as "fr-FR" or "en-US".
    ///
    /// Matching is a case-insensitive substring test in the order fr, en, ru;
    /// anything else is English.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        if tag.contains("fr") {
            Self::French
        } else if tag.contains("en") {
            Self::English
        } else if tag.contains("ru") {
            Self::Russian
        } else {
            Self::English
        }
    }

    /// Value of the `lang` query parameter
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
            Self::Russian => "ru",
        }
    }

    pub fn locale(&self) -> chrono::Locale {
        match self {
            Self::English => chrono::Locale::en_US,
            Self::French => chrono::Locale::fr_FR,
            Self::Russian => chrono::Locale::ru_RU,
        }
    }
}

/// Weather condition codes as reported in the `icon` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    #[default]
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Rain,
    Sleet,
    Snow,
    Wind,
    Fog,
}

impl Condition {
    /// Parse a condition code. Unknown codes default to clear day.
    pub fn from_code(code: &str) -> Self {
        match code {
            "clear-day" => Self::ClearDay,
            "clear-night" => Self::ClearNight,
            "partly-cloudy-day" => Self::PartlyCloudyDay,
            "partly-cloudy-night" => Self::PartlyCloudyNight,
            "cloudy" => Self::Cloudy,
            "rain" => Self::Rain,
            "sleet" => Self::Sleet,
            "snow" => Self::Snow,
            "wind" => Self::Wind,
            "fog" => Self::Fog,
            _ => Self::ClearDay,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::ClearDay => "clear-day",
            Self::ClearNight => "clear-night",
            Self::PartlyCloudyDay => "partly-cloudy-day",
            Self::PartlyCloudyNight => "partly-cloudy-night",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Sleet => "sleet",
            Self::Snow => "snow",
            Self::Wind => "wind",
            Self::Fog => "fog",
        }
    }

    /// Night conditions show the moon instead of a condition icon
    pub fn is_night(&self) -> bool {
        matches!(self, Self::ClearNight | Self::PartlyCloudyNight)
    }
}

impl From<String> for Condition {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.code().to_string()
    }
}

/// Kind of precipitation currently falling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationType {
    Rain,
    Snow,
    Sleet,
    #[serde(other)]
    Other,
}

/// Point observation for the current moment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currently {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub icon: Condition,
    pub temperature: f64,
    pub apparent_temperature: f64,
    #[serde(default)]
    pub wind_speed: f64,
    #[serde(default)]
    pub wind_bearing: f64,
    /// Relative humidity in [0, 1]
    #[serde(default)]
    pub humidity: f64,
    /// Cloud cover in [0, 1]
    #[serde(default)]
    pub cloud_cover: f64,
    /// Precipitation probability in [0, 1]
    #[serde(default)]
    pub precip_probability: f64,
    #[serde(default)]
    pub precip_type: Option<PrecipitationType>,
}

/// Hourly forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourPoint {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub icon: Condition,
    #[serde(default)]
    pub temperature: f64,
    pub apparent_temperature: f64,
    #[serde(default)]
    pub precip_probability: f64,
}

/// Daily forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPoint {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub icon: Condition,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub apparent_temperature_max: f64,
    pub apparent_temperature_min: f64,
    /// Lunation fraction in [0, 1): 0 new, 0.25 first quarter, 0.5 full, 0.75 third quarter
    #[serde(default)]
    pub moon_phase: f64,
    #[serde(default)]
    pub precip_probability: f64,
}

/// A block of forecast points with an optional overall summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataBlock<T> {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub icon: Option<Condition>,
    pub data: Vec<T>,
}

impl<T> DataBlock<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            summary: None,
            icon: None,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }
}

/// Complete forecast snapshot.
///
/// Index 0 of `hourly` and `daily` is the current hour and today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    pub currently: Currently,
    pub hourly: DataBlock<HourPoint>,
    pub daily: DataBlock<DayPoint>,
}

impl Forecast {
    /// Today's entry in the daily block
    pub fn today(&self) -> Option<&DayPoint> {
        self.daily.get(0)
    }
}

/// A saved location that can be pinned as a secondary tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationItem {
    pub name: String,
    #[serde(default)]
    pub town: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationItem {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            town: None,
            latitude,
            longitude,
        }
    }

    /// Town shown on the tile: the explicit town when known, else the name
    pub fn display_town(&self) -> &str {
        self.town
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.name)
    }
}

/// Geolocation errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
}

/// Forecast provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
    #[error("Location error: {0}")]
    Location(#[from] LocationError),
    #[error("Forecast API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Forecast API key not configured")]
    MissingApiKey,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Network(e) => e.user_message(),
            WeatherError::Location(_) => "Unable to determine your location.",
            WeatherError::Api { status, .. } if *status == 401 || *status == 403 => {
                "Forecast API key is invalid. Check settings."
            }
            WeatherError::Api { .. } => "Weather service error. Please try again.",
            WeatherError::Parse(_) => "Received an unexpected forecast. Please try again.",
            WeatherError::MissingApiKey => "No forecast API key configured. Check settings.",
            WeatherError::InvalidRequest(_) => "The forecast request was invalid.",
        }
    }
}
