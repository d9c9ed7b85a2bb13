use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, with_security_headers, Config};
use crate::handlers::{artists, health_check, not_found, shows, venues};
use crate::state::AppState;

pub fn create_routes(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/venues", get(venues::list_by_area))
        .route("/venues/create", post(venues::create))
        .route("/venues/search", post(venues::search))
        .route("/venues/:venue_id", get(venues::show).delete(venues::delete))
        .route(
            "/venues/:venue_id/edit",
            get(venues::edit_form).post(venues::update),
        )
        .route("/artists", get(artists::list))
        .route("/artists/create", post(artists::create))
        .route("/artists/search", post(artists::search))
        .route(
            "/artists/:artist_id",
            get(artists::show).delete(artists::delete),
        )
        .route(
            "/artists/:artist_id/edit",
            get(artists::edit_form).post(artists::update),
        )
        .route("/shows", get(shows::list))
        .route("/shows/create", post(shows::create))
        .fallback(not_found)
        .with_state(state);

    with_security_headers(router, config.production)
        .layer(create_cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}
