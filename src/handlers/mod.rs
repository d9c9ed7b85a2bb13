use axum::extract::OriginalUri;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::utils::error::AppError;
use crate::utils::response::data;

pub mod artists;
pub mod extract;
pub mod shows;
pub mod venues;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    data(HealthPayload {
        status: "ok",
        service: "fyyur-api",
    })
}

pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    AppError::NotFound(format!("No route for '{}'", uri.path())).into_response()
}
