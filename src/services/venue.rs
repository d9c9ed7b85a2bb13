use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::info;

use crate::db;
use crate::models::venue::{group_by_area, VenueAreaRow};
use crate::models::{Area, SearchResults, UpcomingSummary, Venue, VenueFields, VenueView};
use crate::services::{contains_pattern, show};
use crate::utils::error::AppError;

const VENUE_COLUMNS: &str = "id, name, genres, address, city, state, phone, website, \
                             facebook_link, seeking_talent, seeking_description, image_link";

fn not_found(venue_id: i32) -> AppError {
    AppError::NotFound(format!("Venue with id '{}' was not found", venue_id))
}

pub async fn create_venue(pool: &PgPool, fields: &VenueFields) -> Result<Venue, AppError> {
    let mut tx = pool.begin().await?;
    let result = insert_venue(&mut tx, fields).await;
    let venue = db::finish(tx, result, "create venue").await?;

    info!(venue_id = venue.id, name = %venue.name, "Venue listed");
    Ok(venue)
}

async fn insert_venue(conn: &mut PgConnection, fields: &VenueFields) -> Result<Venue, AppError> {
    let query = format!(
        r#"
        INSERT INTO venues (name, genres, address, city, state, phone, website,
                            facebook_link, seeking_talent, seeking_description, image_link)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {VENUE_COLUMNS}
        "#
    );
    let venue = sqlx::query_as::<_, Venue>(&query)
        .bind(&fields.name)
        .bind(&fields.genres)
        .bind(&fields.address)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.phone)
        .bind(&fields.website)
        .bind(&fields.facebook_link)
        .bind(fields.seeking_talent)
        .bind(&fields.seeking_description)
        .bind(&fields.image_link)
        .fetch_one(&mut *conn)
        .await?;
    Ok(venue)
}

/// Overwrites every mutable column of the venue.
pub async fn update_venue(
    pool: &PgPool,
    venue_id: i32,
    fields: &VenueFields,
) -> Result<Venue, AppError> {
    let mut tx = pool.begin().await?;
    let result = overwrite_venue(&mut tx, venue_id, fields).await;
    let venue = db::finish(tx, result, "update venue").await?;

    info!(venue_id = venue.id, "Venue updated");
    Ok(venue)
}

async fn overwrite_venue(
    conn: &mut PgConnection,
    venue_id: i32,
    fields: &VenueFields,
) -> Result<Venue, AppError> {
    let query = format!(
        r#"
        UPDATE venues
        SET name = $2, genres = $3, address = $4, city = $5, state = $6, phone = $7,
            website = $8, facebook_link = $9, seeking_talent = $10,
            seeking_description = $11, image_link = $12
        WHERE id = $1
        RETURNING {VENUE_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Venue>(&query)
        .bind(venue_id)
        .bind(&fields.name)
        .bind(&fields.genres)
        .bind(&fields.address)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.phone)
        .bind(&fields.website)
        .bind(&fields.facebook_link)
        .bind(fields.seeking_talent)
        .bind(&fields.seeking_description)
        .bind(&fields.image_link)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| not_found(venue_id))
}

/// Deletes the venue together with all of its shows. Returns how many shows went with it.
pub async fn delete_venue(pool: &PgPool, venue_id: i32) -> Result<u64, AppError> {
    let mut tx = pool.begin().await?;
    let result = remove_venue(&mut tx, venue_id).await;
    let removed_shows = db::finish(tx, result, "delete venue").await?;

    info!(venue_id, removed_shows, "Venue deleted");
    Ok(removed_shows)
}

async fn remove_venue(conn: &mut PgConnection, venue_id: i32) -> Result<u64, AppError> {
    let removed_shows = sqlx::query("DELETE FROM shows WHERE venue_id = $1")
        .bind(venue_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    let removed = sqlx::query("DELETE FROM venues WHERE id = $1")
        .bind(venue_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    if removed == 0 {
        return Err(not_found(venue_id));
    }
    Ok(removed_shows)
}

/// Case-insensitive substring search on the venue name. An empty term matches every venue.
pub async fn search_venues(
    pool: &PgPool,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults<UpcomingSummary>, AppError> {
    let matches = sqlx::query_as::<_, UpcomingSummary>(
        r#"
        SELECT v.id, v.name,
               COUNT(s.id) FILTER (WHERE s.start_time > $2) AS num_upcoming_shows
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id
        WHERE v.name ILIKE $1
        GROUP BY v.id, v.name
        ORDER BY v.name, v.id
        "#,
    )
    .bind(contains_pattern(term))
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(SearchResults::from(matches))
}

pub async fn list_venues_by_area(pool: &PgPool, now: DateTime<Utc>) -> Result<Vec<Area>, AppError> {
    let rows = sqlx::query_as::<_, VenueAreaRow>(
        r#"
        SELECT v.id, v.name, v.city, v.state,
               COUNT(s.id) FILTER (WHERE s.start_time > $1) AS num_upcoming_shows
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id
        GROUP BY v.id, v.name, v.city, v.state
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(group_by_area(rows))
}

/// The stored record alone, as used to pre-fill the edit form.
pub async fn get_venue_record(pool: &PgPool, venue_id: i32) -> Result<Venue, AppError> {
    let mut conn = pool.acquire().await?;
    fetch_venue(&mut conn, venue_id).await
}

async fn fetch_venue(conn: &mut PgConnection, venue_id: i32) -> Result<Venue, AppError> {
    let query = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1");
    sqlx::query_as::<_, Venue>(&query)
        .bind(venue_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| not_found(venue_id))
}

/// The venue page. Record and shows are read from one snapshot.
pub async fn get_venue(pool: &PgPool, venue_id: i32, now: DateTime<Utc>) -> Result<VenueView, AppError> {
    let mut tx = db::read_snapshot(pool).await?;
    let venue = fetch_venue(&mut tx, venue_id).await?;
    let shows = show::shows_for_venue(&mut tx, venue_id).await?;
    tx.commit().await?;
    Ok(VenueView::new(venue, &shows, now))
}
