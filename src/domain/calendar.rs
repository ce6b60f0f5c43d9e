use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub is_leap: bool,
}

impl LunarDate {
    pub fn new(year: i32, month: u32, day: u32, is_leap: bool) -> Self {
        Self { year, month, day, is_leap }
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
        if self.is_leap {
            f.write_str(" (윤달)")?;
        }
        Ok(())
    }
}

/// Sexagenary labels of a day in phonetic form, e.g. `경오` / `신사` / `경진`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GanzhiLabels {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl fmt::Display for GanzhiLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}년 {}월 {}일", self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("lunar date {0} does not exist")]
    NoSuchLunarDate(LunarDate),
    #[error("solar date {0} is outside the supported range")]
    SolarOutOfRange(NaiveDate),
}

/// Lunar/solar conversion and day labeling, as consumed by the resolver.
pub trait CalendarEngine: Send + Sync {
    fn lunar_to_solar(&self, date: LunarDate) -> Result<NaiveDate, CalendarError>;

    fn solar_to_ganzhi(&self, date: NaiveDate) -> Result<GanzhiLabels, CalendarError>;
}
