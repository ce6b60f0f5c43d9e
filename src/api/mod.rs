use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::de::DeserializeOwned;

pub mod error;
pub mod page;
pub mod reading;

use crate::reading::ReadingRequest;
use crate::state::AppState;

pub const MALFORMED_FORM_MESSAGE: &str = "입력값을 읽을 수 없습니다. 다시 입력해 주세요.";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(reading::form_page))
        .route("/reading", get(reading::submit_form))
        .route("/api/reading", post(reading::create_reading))
        .route("/_health", get(reading::health))
        .with_state(state)
}

/// Form submitted with `method="get"`, decoded from the query string by `serde_qs`.
pub struct FormQuery<T>(pub T);

/// A query string `serde_qs` could not decode. Answers with a fresh form and
/// a 400 instead of an empty body.
#[derive(Debug)]
pub struct FormRejection(serde_qs::Error);

impl IntoResponse for FormRejection {
    fn into_response(self) -> Response {
        let html = page::form_page(&ReadingRequest::default(), Some(MALFORMED_FORM_MESSAGE));
        (StatusCode::BAD_REQUEST, Html(html)).into_response()
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for FormQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = FormRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        serde_qs::from_str(query).map(FormQuery).map_err(|e| {
            tracing::warn!(error = %e, "Undecodable form query");
            FormRejection(e)
        })
    }
}
