//! Icon selection for tile content.

use feels_weather::{Condition, Forecast, PrecipitationType};

pub const WIND_DIRECTION: &str = "Assets/TileIcons/wind_direction.png";
pub const HUMIDITY: &str = "Assets/TileIcons/humidity.png";
pub const CLOUD_COVER: &str = "Assets/TileIcons/cloudy.png";
pub const WIND: &str = "Assets/TileIcons/wind.png";
pub const PRECIP_PROBABILITY: &str = "Assets/TileIcons/precip_proba.png";

/// Icon path for a condition. Total: unknown codes already parse to clear day.
pub fn condition_icon(condition: Condition) -> &'static str {
    match condition {
        Condition::ClearDay => "Assets/TileIcons/sun.png",
        Condition::ClearNight => "Assets/TileIcons/moon.png",
        Condition::PartlyCloudyDay => "Assets/TileIcons/partycloudy_day.png",
        Condition::PartlyCloudyNight => "Assets/TileIcons/partycloudy_night.png",
        Condition::Cloudy => "Assets/TileIcons/cloudy.png",
        Condition::Rain => "Assets/TileIcons/rain.png",
        Condition::Sleet => "Assets/TileIcons/sleet.png",
        Condition::Snow => "Assets/TileIcons/snow.png",
        Condition::Wind => "Assets/TileIcons/wind.png",
        Condition::Fog => "Assets/TileIcons/fog.png",
    }
}

/// Icon path for a raw condition code string
pub fn code_icon(code: &str) -> &'static str {
    condition_icon(Condition::from_code(code))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    ThirdQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Buckets a lunation fraction.
    ///
    /// The four quarter boundaries match by exact float equality; values
    /// between them fall in the open ranges. Anything that matches no bucket
    /// (above 0.75, negative, NaN) is a waning crescent.
    #[allow(clippy::float_cmp)]
    pub fn from_fraction(m: f64) -> Self {
        if m == 0.0 {
            Self::New
        } else if m > 0.0 && m < 0.25 {
            Self::WaxingCrescent
        } else if m == 0.25 {
            Self::FirstQuarter
        } else if m > 0.25 && m < 0.5 {
            Self::WaxingGibbous
        } else if m == 0.5 {
            Self::Full
        } else if m > 0.5 && m < 0.75 {
            Self::WaningGibbous
        } else if m == 0.75 {
            Self::ThirdQuarter
        } else {
            Self::WaningCrescent
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::New => "Assets/TileIcons/moon_new.png",
            Self::WaxingCrescent => "Assets/TileIcons/moon_waxing_crescent.png",
            Self::FirstQuarter => "Assets/TileIcons/moon_first_quarter.png",
            Self::WaxingGibbous => "Assets/TileIcons/moon_waxing_gibbous.png",
            Self::Full => "Assets/TileIcons/moon_full.png",
            Self::WaningGibbous => "Assets/TileIcons/moon_waning_gibbous.png",
            Self::ThirdQuarter => "Assets/TileIcons/moon_third_quarter.png",
            Self::WaningCrescent => "Assets/TileIcons/moon_waning_crescent.png",
        }
    }
}

pub fn moon_phase_icon(fraction: f64) -> &'static str {
    MoonPhase::from_fraction(fraction).icon()
}

/// Icon for the current conditions: the moon phase of today at night,
/// otherwise the condition icon. Returns `None` when a night condition needs
/// today's moon phase but the daily series is empty.
pub fn current_icon(forecast: &Forecast) -> Option<&'static str> {
    let condition = forecast.currently.icon;
    if condition.is_night() {
        forecast.today().map(|day| moon_phase_icon(day.moon_phase))
    } else {
        Some(condition_icon(condition))
    }
}

/// Icon for the kind of precipitation, `None` when there is nothing to show
pub fn precipitation_icon(kind: Option<PrecipitationType>) -> Option<&'static str> {
    match kind? {
        PrecipitationType::Rain => Some("Assets/Icons/rain.png"),
        PrecipitationType::Sleet => Some("Assets/Icons/sleet.png"),
        PrecipitationType::Snow => Some("Assets/Icons/snow.png"),
        PrecipitationType::Other => None,
    }
}
