use axum::extract::State;
use axum::response::Response;
use chrono::Utc;

use crate::handlers::extract::{FormFields, RecordId};
use crate::models::ArtistFields;
use crate::services::artist;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{data, flash, success};

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let artists = artist::list_artists(&state.pool).await?;
    Ok(data(artists))
}

pub async fn create(
    State(state): State<AppState>,
    FormFields(form): FormFields,
) -> Result<Response, AppError> {
    let fields = ArtistFields::try_from(form)?;
    let created = artist::create_artist(&state.pool, &fields).await?;
    Ok(success(created, "Artist listed successfully!"))
}

pub async fn search(
    State(state): State<AppState>,
    FormFields(form): FormFields,
) -> Result<Response, AppError> {
    let term = form.optional("search_term").unwrap_or_default();
    let results = artist::search_artists(&state.pool, &term, Utc::now()).await?;
    Ok(data(results))
}

pub async fn show(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
) -> Result<Response, AppError> {
    let view = artist::get_artist(&state.pool, artist_id, Utc::now()).await?;
    Ok(data(view))
}

pub async fn edit_form(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
) -> Result<Response, AppError> {
    let record = artist::get_artist_record(&state.pool, artist_id).await?;
    Ok(data(record))
}

pub async fn update(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
    FormFields(form): FormFields,
) -> Result<Response, AppError> {
    let fields = ArtistFields::try_from(form)?;
    let updated = artist::update_artist(&state.pool, artist_id, &fields).await?;
    Ok(success(updated, "Artist updated successfully!"))
}

pub async fn delete(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
) -> Result<Response, AppError> {
    artist::delete_artist(&state.pool, artist_id).await?;
    Ok(flash("Artist deleted successfully!"))
}
