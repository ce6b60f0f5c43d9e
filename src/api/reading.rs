use std::str::FromStr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::page;
use crate::api::FormQuery;
use crate::domain::catalog::Gender;
use crate::domain::fortune::CLOSING_ADVICE;
use crate::domain::outlook::star_count;
use crate::reading::{perform_reading, FieldError, Reading, ReadingRequest};
use crate::state::AppState;

/// Query string of the HTML form. Every field stays text so that a blank or
/// mistyped number reaches validation instead of failing extraction.
/// Unchecked checkboxes are simply absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub year: String,
    pub month: String,
    pub day: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leap_month: Option<String>,
    pub hour_slot: String,
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

fn is_checked(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some("on" | "true" | "1"))
}

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::Missing(field));
    }
    raw.parse().map_err(|_| FieldError::NotANumber {
        field,
        value: raw.to_string(),
    })
}

impl ReadingForm {
    /// What to show back in the form. Numbers that do not parse keep their
    /// default value.
    pub fn prefill(&self) -> ReadingRequest {
        let defaults = ReadingRequest::default();
        ReadingRequest {
            name: self.name.clone(),
            gender: match self.gender.as_deref() {
                Some("여") => Gender::Female,
                _ => Gender::Male,
            },
            year: self.year.trim().parse().unwrap_or(defaults.year),
            month: self.month.trim().parse().unwrap_or(defaults.month),
            day: self.day.trim().parse().unwrap_or(defaults.day),
            lunar: is_checked(&self.lunar),
            leap_month: is_checked(&self.leap_month),
            hour_slot: self.hour_slot.trim().parse().unwrap_or(defaults.hour_slot),
            topic: self.topic.clone(),
            seed: self.seed.clone().filter(|s| !s.is_empty()),
        }
    }

    pub fn to_request(&self) -> Result<ReadingRequest, FieldError> {
        Ok(ReadingRequest {
            year: parse_number("year", &self.year)?,
            month: parse_number("month", &self.month)?,
            day: parse_number("day", &self.day)?,
            hour_slot: parse_number("hour_slot", &self.hour_slot)?,
            ..self.prefill()
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PillarView {
    pub title: String,
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthView {
    pub month: u8,
    pub score: u8,
    pub stars: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadingResponse {
    pub name: String,
    pub gender: Gender,
    pub topic: String,
    pub solar_date: String,
    pub zodiac: String,
    pub pillars: Vec<PillarView>,
    pub headline: String,
    pub opening_line: String,
    pub detail: String,
    pub outlook_year: i32,
    pub monthly: Vec<MonthView>,
    pub advice: String,
}

impl ReadingResponse {
    pub fn new(reading: Reading, outlook_year: i32) -> Self {
        Self {
            pillars: reading
                .pillars
                .titled()
                .map(|(title, pillar)| PillarView {
                    title: title.to_string(),
                    code: pillar.code(),
                })
                .collect(),
            monthly: (1u8..)
                .zip(reading.monthly_scores)
                .map(|(month, score)| MonthView {
                    month,
                    score,
                    stars: star_count(score),
                })
                .collect(),
            solar_date: reading.solar_date.format("%Y-%m-%d").to_string(),
            zodiac: reading.zodiac.label().to_string(),
            detail: reading.detail.to_string(),
            name: reading.name,
            gender: reading.gender,
            topic: reading.topic,
            headline: reading.headline,
            opening_line: reading.opening_line,
            outlook_year,
            advice: CLOSING_ADVICE.to_string(),
        }
    }
}

pub async fn form_page() -> Html<String> {
    Html(page::form_page(&ReadingRequest::default(), None))
}

pub async fn submit_form(
    State(state): State<AppState>,
    FormQuery(form): FormQuery<ReadingForm>,
) -> Response {
    let request = match form.to_request() {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "Unreadable form field");
            let error = ApiError::InvalidField(e);
            let html = page::form_page(&form.prefill(), Some(&error.message()));
            return (error.status(), Html(html)).into_response();
        }
    };

    match perform_reading(&state, &request).await {
        Ok(reading) => Html(page::result_page(&request, &reading, state.outlook_year)).into_response(),
        Err(e) => {
            let error = ApiError::from(e);
            let html = page::form_page(&request, Some(&error.message()));
            (error.status(), Html(html)).into_response()
        }
    }
}

pub async fn create_reading(
    State(state): State<AppState>,
    Json(request): Json<ReadingRequest>,
) -> Result<Json<ReadingResponse>, ApiError> {
    let reading = perform_reading(&state, &request).await?;
    Ok(Json(ReadingResponse::new(reading, state.outlook_year)))
}

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "version": env!("CARGO_PKG_VERSION") })),
    )
}
