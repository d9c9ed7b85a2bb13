use axum::extract::State;
use axum::response::Response;
use chrono::Utc;

use crate::handlers::extract::{FormFields, RecordId};
use crate::models::VenueFields;
use crate::services::venue;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{data, flash, success};

pub async fn list_by_area(State(state): State<AppState>) -> Result<Response, AppError> {
    let areas = venue::list_venues_by_area(&state.pool, Utc::now()).await?;
    Ok(data(areas))
}

pub async fn create(
    State(state): State<AppState>,
    FormFields(form): FormFields,
) -> Result<Response, AppError> {
    let fields = VenueFields::try_from(form)?;
    let created = venue::create_venue(&state.pool, &fields).await?;
    Ok(success(created, "Venue listed successfully!"))
}

pub async fn search(
    State(state): State<AppState>,
    FormFields(form): FormFields,
) -> Result<Response, AppError> {
    let term = form.optional("search_term").unwrap_or_default();
    let results = venue::search_venues(&state.pool, &term, Utc::now()).await?;
    Ok(data(results))
}

pub async fn show(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
) -> Result<Response, AppError> {
    let view = venue::get_venue(&state.pool, venue_id, Utc::now()).await?;
    Ok(data(view))
}

pub async fn edit_form(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
) -> Result<Response, AppError> {
    let record = venue::get_venue_record(&state.pool, venue_id).await?;
    Ok(data(record))
}

pub async fn update(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
    FormFields(form): FormFields,
) -> Result<Response, AppError> {
    let fields = VenueFields::try_from(form)?;
    let updated = venue::update_venue(&state.pool, venue_id, &fields).await?;
    Ok(success(updated, "Venue updated successfully!"))
}

pub async fn delete(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
) -> Result<Response, AppError> {
    venue::delete_venue(&state.pool, venue_id).await?;
    Ok(flash("Venue deleted successfully!"))
}
