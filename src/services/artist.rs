use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::info;

use crate::db;
use crate::models::{Artist, ArtistFields, ArtistName, ArtistView, SearchResults, UpcomingSummary};
use crate::services::{contains_pattern, show};
use crate::utils::error::AppError;

const ARTIST_COLUMNS: &str = "id, name, genres, city, state, phone, website, \
                              facebook_link, seeking_venue, seeking_description, image_link";

fn not_found(artist_id: i32) -> AppError {
    AppError::NotFound(format!("Artist with id '{}' was not found", artist_id))
}

pub async fn create_artist(pool: &PgPool, fields: &ArtistFields) -> Result<Artist, AppError> {
    let mut tx = pool.begin().await?;
    let result = insert_artist(&mut tx, fields).await;
    let artist = db::finish(tx, result, "create artist").await?;

    info!(artist_id = artist.id, name = %artist.name, "Artist listed");
    Ok(artist)
}

async fn insert_artist(conn: &mut PgConnection, fields: &ArtistFields) -> Result<Artist, AppError> {
    let query = format!(
        r#"
        INSERT INTO artists (name, genres, city, state, phone, website,
                             facebook_link, seeking_venue, seeking_description, image_link)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {ARTIST_COLUMNS}
        "#
    );
    let artist = sqlx::query_as::<_, Artist>(&query)
        .bind(&fields.name)
        .bind(&fields.genres)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.phone)
        .bind(&fields.website)
        .bind(&fields.facebook_link)
        .bind(fields.seeking_venue)
        .bind(&fields.seeking_description)
        .bind(&fields.image_link)
        .fetch_one(&mut *conn)
        .await?;
    Ok(artist)
}

pub async fn update_artist(
    pool: &PgPool,
    artist_id: i32,
    fields: &ArtistFields,
) -> Result<Artist, AppError> {
    let mut tx = pool.begin().await?;
    let result = overwrite_artist(&mut tx, artist_id, fields).await;
    let artist = db::finish(tx, result, "update artist").await?;

    info!(artist_id = artist.id, "Artist updated");
    Ok(artist)
}

async fn overwrite_artist(
    conn: &mut PgConnection,
    artist_id: i32,
    fields: &ArtistFields,
) -> Result<Artist, AppError> {
    let query = format!(
        r#"
        UPDATE artists
        SET name = $2, genres = $3, city = $4, state = $5, phone = $6, website = $7,
            facebook_link = $8, seeking_venue = $9, seeking_description = $10,
            image_link = $11
        WHERE id = $1
        RETURNING {ARTIST_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Artist>(&query)
        .bind(artist_id)
        .bind(&fields.name)
        .bind(&fields.genres)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.phone)
        .bind(&fields.website)
        .bind(&fields.facebook_link)
        .bind(fields.seeking_venue)
        .bind(&fields.seeking_description)
        .bind(&fields.image_link)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| not_found(artist_id))
}

pub async fn delete_artist(pool: &PgPool, artist_id: i32) -> Result<u64, AppError> {
    let mut tx = pool.begin().await?;
    let result = remove_artist(&mut tx, artist_id).await;
    let removed_shows = db::finish(tx, result, "delete artist").await?;

    info!(artist_id, removed_shows, "Artist deleted");
    Ok(removed_shows)
}

async fn remove_artist(conn: &mut PgConnection, artist_id: i32) -> Result<u64, AppError> {
    let removed_shows = sqlx::query("DELETE FROM shows WHERE artist_id = $1")
        .bind(artist_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    let removed = sqlx::query("DELETE FROM artists WHERE id = $1")
        .bind(artist_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    if removed == 0 {
        return Err(not_found(artist_id));
    }
    Ok(removed_shows)
}

pub async fn list_artists(pool: &PgPool) -> Result<Vec<ArtistName>, AppError> {
    let artists = sqlx::query_as::<_, ArtistName>("SELECT id, name FROM artists ORDER BY name, id")
        .fetch_all(pool)
        .await?;
    Ok(artists)
}

pub async fn search_artists(
    pool: &PgPool,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults<UpcomingSummary>, AppError> {
    let matches = sqlx::query_as::<_, UpcomingSummary>(
        r#"
        SELECT a.id, a.name,
               COUNT(s.id) FILTER (WHERE s.start_time > $2) AS num_upcoming_shows
        FROM artists a
        LEFT JOIN shows s ON s.artist_id = a.id
        WHERE a.name ILIKE $1
        GROUP BY a.id, a.name
        ORDER BY a.name, a.id
        "#,
    )
    .bind(contains_pattern(term))
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(SearchResults::from(matches))
}

pub async fn get_artist_record(pool: &PgPool, artist_id: i32) -> Result<Artist, AppError> {
    let mut conn = pool.acquire().await?;
    fetch_artist(&mut conn, artist_id).await
}

async fn fetch_artist(conn: &mut PgConnection, artist_id: i32) -> Result<Artist, AppError> {
    let query = format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = $1");
    sqlx::query_as::<_, Artist>(&query)
        .bind(artist_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| not_found(artist_id))
}

pub async fn get_artist(
    pool: &PgPool,
    artist_id: i32,
    now: DateTime<Utc>,
) -> Result<ArtistView, AppError> {
    let mut tx = db::read_snapshot(pool).await?;
    let artist = fetch_artist(&mut tx, artist_id).await?;
    let shows = show::shows_for_artist(&mut tx, artist_id).await?;
    tx.commit().await?;
    Ok(ArtistView::new(artist, &shows, now))
}
