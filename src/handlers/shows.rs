use axum::extract::State;
use axum::response::Response;

use crate::handlers::extract::FormFields;
use crate::models::ShowFields;
use crate::services::show;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{data, success};

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let shows = show::list_shows(&state.pool).await?;
    Ok(data(shows))
}

pub async fn create(
    State(state): State<AppState>,
    FormFields(form): FormFields,
) -> Result<Response, AppError> {
    let fields = ShowFields::try_from(form)?;
    let created = show::create_show(&state.pool, &fields).await?;
    Ok(success(created, "Show listed successfully!"))
}
