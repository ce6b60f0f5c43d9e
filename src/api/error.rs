use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::domain::resolver::DATE_ERROR_MESSAGE;
use crate::reading::{FieldError, ReadingError};

#[derive(Debug)]
pub enum ApiError {
    InvalidField(FieldError),
    InvalidDate,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidField(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidDate => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::InvalidField(e) => e.to_string(),
            ApiError::InvalidDate => DATE_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Date errors collapse into one user-facing message; the variant is only logged.
impl From<ReadingError> for ApiError {
    fn from(e: ReadingError) -> Self {
        match e {
            ReadingError::Field(e) => ApiError::InvalidField(e),
            ReadingError::Date(_) => ApiError::InvalidDate,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}
