use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::domain::calendar::CalendarEngine;
use crate::domain::catalog::{is_known_topic, Gender, HourSlot, TOPICS};
use crate::domain::fortune::{compose, headline};
use crate::domain::ganzhi::Zodiac;
use crate::domain::outlook::generate_monthly_scores;
use crate::domain::resolver::{
    resolve, BirthInput, DateError, FourPillars, MAX_BIRTH_YEAR, MIN_BIRTH_YEAR,
};
use crate::state::AppState;

/// One form submission, as received from either the HTML form or the JSON API.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub lunar: bool,
    #[serde(default)]
    pub leap_month: bool,
    pub hour_slot: usize,
    pub topic: String,
    /// Makes the random parts reproducible when present.
    #[serde(default)]
    pub seed: Option<String>,
}

impl Default for ReadingRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            gender: Gender::default(),
            year: 1980,
            month: 1,
            day: 1,
            lunar: false,
            leap_month: false,
            hour_slot: 0,
            topic: TOPICS[0].to_string(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("birth year {0} is outside 1930..=2026")]
    YearOutOfRange(i32),
    #[error("birth month {0} is outside 1..=12")]
    MonthOutOfRange(u32),
    #[error("birth day {0} is outside 1..=31")]
    DayOutOfRange(u32),
    #[error("unknown birth time slot {0}")]
    UnknownHourSlot(usize),
    #[error("unknown topic {0:?}")]
    UnknownTopic(String),
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} must be a whole number, got {value:?}")]
    NotANumber { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadingError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Date(#[from] DateError),
}

impl ReadingRequest {
    /// Checks the bounds the form itself enforces. Calendar validity is left
    /// to the resolver.
    pub fn birth_input(&self) -> Result<BirthInput, FieldError> {
        if !(MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR).contains(&self.year) {
            return Err(FieldError::YearOutOfRange(self.year));
        }
        if !(1..=12).contains(&self.month) {
            return Err(FieldError::MonthOutOfRange(self.month));
        }
        if !(1..=31).contains(&self.day) {
            return Err(FieldError::DayOutOfRange(self.day));
        }
        let hour_slot =
            HourSlot::new(self.hour_slot).ok_or(FieldError::UnknownHourSlot(self.hour_slot))?;
        if !is_known_topic(&self.topic) {
            return Err(FieldError::UnknownTopic(self.topic.clone()));
        }

        Ok(BirthInput {
            year: self.year,
            month: self.month,
            day: self.day,
            is_lunar: self.lunar,
            is_leap_month: self.leap_month,
            hour_slot,
        })
    }

    pub fn display_name(&self) -> &str {
        self.name.trim()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub name: String,
    pub gender: Gender,
    pub topic: String,
    pub solar_date: NaiveDate,
    pub pillars: FourPillars,
    pub zodiac: Zodiac,
    pub headline: String,
    pub opening_line: String,
    pub detail: &'static str,
    pub monthly_scores: [u8; 12],
}

/// Seeded from the first eight bytes of SHA-256(seed), or from OS entropy.
pub fn reading_rng(seed: Option<&str>) -> StdRng {
    match seed {
        Some(seed) => {
            let hash = Sha256::digest(seed.as_bytes());
            let mut word = [0u8; 8];
            word.copy_from_slice(&hash[..8]);
            StdRng::seed_from_u64(u64::from_be_bytes(word))
        }
        None => StdRng::from_entropy(),
    }
}

pub fn compute_reading(
    calendar: &dyn CalendarEngine,
    request: &ReadingRequest,
) -> Result<Reading, ReadingError> {
    let input = request.birth_input()?;
    let resolution = resolve(calendar, &input)?;

    let name = request.display_name();
    let mut rng = reading_rng(request.seed.as_deref());
    let text = compose(name, resolution.zodiac, &request.topic, &mut rng);
    let monthly_scores = generate_monthly_scores(&mut rng);

    Ok(Reading {
        name: name.to_string(),
        gender: request.gender,
        topic: request.topic.clone(),
        solar_date: resolution.solar_date,
        pillars: resolution.pillars,
        zodiac: resolution.zodiac,
        headline: headline(name, resolution.zodiac, &request.topic),
        opening_line: text.opening_line,
        detail: text.detail,
        monthly_scores,
    })
}

/// Waits out the configured delay, then computes the reading.
pub async fn perform_reading(state: &AppState, request: &ReadingRequest) -> Result<Reading, ReadingError> {
    if !state.reading_delay.is_zero() {
        tracing::debug!(delay_ms = state.reading_delay.as_millis() as u64, "Consulting the spirits");
        tokio::time::sleep(state.reading_delay).await;
    }

    match compute_reading(state.calendar.as_ref(), request) {
        Ok(reading) => {
            tracing::info!(
                solar_date = %reading.solar_date,
                zodiac = %reading.zodiac,
                lunar = request.lunar,
                hour_slot = request.hour_slot,
                "Reading composed"
            );
            Ok(reading)
        }
        Err(ReadingError::Date(e)) => {
            tracing::info!(kind = e.kind(), error = %e, "Rejected birth date");
            Err(e.into())
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected form input");
            Err(e)
        }
    }
}
