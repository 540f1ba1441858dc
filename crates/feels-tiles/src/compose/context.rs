use chrono::{DateTime, FixedOffset, Local};
use feels_weather::{Language, MeasurementSystem};

/// Display preferences for one composition call
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayContext {
    /// Town shown on current-conditions tiles. May be empty.
    pub town: String,
    pub units: MeasurementSystem,
    pub language: Language,
    /// Local time of the composition; its offset localizes every timestamp
    pub now: DateTime<FixedOffset>,
}

impl DisplayContext {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            town: String::new(),
            units: MeasurementSystem::default(),
            language: Language::default(),
            now,
        }
    }

    /// Context stamped with the machine's local time
    pub fn local_now() -> Self {
        Self::new(Local::now().fixed_offset())
    }

    pub fn town(mut self, town: impl Into<String>) -> Self {
        self.town = town.into();
        self
    }

    pub fn units(mut self, units: MeasurementSystem) -> Self {
        self.units = units;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn offset(&self) -> &FixedOffset {
        self.now.offset()
    }
}
