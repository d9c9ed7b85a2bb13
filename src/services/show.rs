use sqlx::{PgConnection, PgPool};
use tracing::info;

use crate::db;
use crate::models::{Show, ShowDetail, ShowFields, ShowListing};
use crate::utils::error::AppError;

const SHOW_DETAIL_SELECT: &str = r#"
    SELECT s.id, s.start_time,
           a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
           v.id AS venue_id, v.name AS venue_name, v.image_link AS venue_image_link
    FROM shows s
    JOIN artists a ON a.id = s.artist_id
    JOIN venues v ON v.id = s.venue_id
"#;

pub async fn create_show(pool: &PgPool, fields: &ShowFields) -> Result<Show, AppError> {
    let mut tx = pool.begin().await?;
    let result = insert_show(&mut tx, fields).await;
    let show = db::finish(tx, result, "create show").await?;

    info!(
        show_id = show.id,
        artist_id = show.artist_id,
        venue_id = show.venue_id,
        start_time = %show.start_time,
        "Show listed"
    );
    Ok(show)
}

async fn insert_show(conn: &mut PgConnection, fields: &ShowFields) -> Result<Show, AppError> {
    // Key-share locks keep both parents alive until commit.
    let artist: Option<i32> = sqlx::query_scalar("SELECT id FROM artists WHERE id = $1 FOR KEY SHARE")
        .bind(fields.artist_id)
        .fetch_optional(&mut *conn)
        .await?;
    if artist.is_none() {
        return Err(AppError::ForeignKeyViolation(format!(
            "Artist with id '{}' does not exist",
            fields.artist_id
        )));
    }

    let venue: Option<i32> = sqlx::query_scalar("SELECT id FROM venues WHERE id = $1 FOR KEY SHARE")
        .bind(fields.venue_id)
        .fetch_optional(&mut *conn)
        .await?;
    if venue.is_none() {
        return Err(AppError::ForeignKeyViolation(format!(
            "Venue with id '{}' does not exist",
            fields.venue_id
        )));
    }

    let show = sqlx::query_as::<_, Show>(
        r#"
        INSERT INTO shows (artist_id, venue_id, start_time)
        VALUES ($1, $2, $3)
        RETURNING id, artist_id, venue_id, start_time
        "#,
    )
    .bind(fields.artist_id)
    .bind(fields.venue_id)
    .bind(fields.start_time)
    .fetch_one(&mut *conn)
    .await?;

    Ok(show)
}

pub async fn list_shows(pool: &PgPool) -> Result<Vec<ShowListing>, AppError> {
    let query = format!("{SHOW_DETAIL_SELECT} ORDER BY s.start_time, s.id");
    let shows = sqlx::query_as::<_, ShowDetail>(&query)
        .fetch_all(pool)
        .await?;

    Ok(shows.iter().map(ShowDetail::listing).collect())
}

pub async fn shows_for_venue(
    conn: &mut PgConnection,
    venue_id: i32,
) -> Result<Vec<ShowDetail>, AppError> {
    let query = format!("{SHOW_DETAIL_SELECT} WHERE s.venue_id = $1 ORDER BY s.start_time, s.id");
    let shows = sqlx::query_as::<_, ShowDetail>(&query)
        .bind(venue_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(shows)
}

pub async fn shows_for_artist(
    conn: &mut PgConnection,
    artist_id: i32,
) -> Result<Vec<ShowDetail>, AppError> {
    let query = format!("{SHOW_DETAIL_SELECT} WHERE s.artist_id = $1 ORDER BY s.start_time, s.id");
    let shows = sqlx::query_as::<_, ShowDetail>(&query)
        .bind(artist_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(shows)
}
