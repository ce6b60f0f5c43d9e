use crate::config::Config;
use crate::domain::calendar::CalendarEngine;
use crate::domain::korean_lunar::KoreanLunarCalendar;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub calendar: Arc<dyn CalendarEngine>,
    pub reading_delay: Duration,
    pub outlook_year: i32,
}

impl AppState {
    pub fn from_config(conf: &Config) -> Self {
        Self {
            calendar: Arc::new(KoreanLunarCalendar::new()),
            reading_delay: conf.reading_delay,
            outlook_year: conf.outlook_year,
        }
    }
}
