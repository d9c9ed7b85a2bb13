use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::error::AppError;
use crate::utils::form::FormData;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Show {
    pub id: i32,
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<Utc>,
}

/// Validated body of the new-show form.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowFields {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<Utc>,
}

impl TryFrom<FormData> for ShowFields {
    type Error = AppError;

    fn try_from(form: FormData) -> Result<Self, Self::Error> {
        Ok(Self {
            artist_id: form.id("artist_id")?,
            venue_id: form.id("venue_id")?,
            start_time: form.timestamp("start_time")?,
        })
    }
}

/// A show joined with both of its owners. Every show view is a projection of this row.
#[derive(Debug, Clone, FromRow)]
pub struct ShowDetail {
    pub id: i32,
    pub start_time: DateTime<Utc>,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
}

/// Flat entry on the show listing page.
#[derive(Debug, Clone, Serialize)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A show embedded in its venue's page; the venue is implied.
#[derive(Debug, Clone, Serialize)]
pub struct VenueShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A show embedded in its artist's page; the artist is implied.
#[derive(Debug, Clone, Serialize)]
pub struct ArtistShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl ShowDetail {
    pub fn listing(&self) -> ShowListing {
        ShowListing {
            venue_id: self.venue_id,
            venue_name: self.venue_name.clone(),
            artist_id: self.artist_id,
            artist_name: self.artist_name.clone(),
            artist_image_link: self.artist_image_link.clone(),
            start_time: self.start_time,
        }
    }

    pub fn for_venue(&self) -> VenueShow {
        VenueShow {
            artist_id: self.artist_id,
            artist_name: self.artist_name.clone(),
            artist_image_link: self.artist_image_link.clone(),
            start_time: self.start_time,
        }
    }

    pub fn for_artist(&self) -> ArtistShow {
        ArtistShow {
            venue_id: self.venue_id,
            venue_name: self.venue_name.clone(),
            venue_image_link: self.venue_image_link.clone(),
            start_time: self.start_time,
        }
    }
}

pub fn is_upcoming(start_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start_time > now
}

pub fn is_past(start_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    !is_upcoming(start_time, now)
}

#[derive(Debug, Clone, Serialize)]
pub struct PartitionedShows<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Splits shows around a single `now` snapshot, projecting each one with `view`.
/// Input order is preserved inside each half.
pub fn partition_shows<T, F>(shows: &[ShowDetail], now: DateTime<Utc>, view: F) -> PartitionedShows<T>
where
    F: Fn(&ShowDetail) -> T,
{
    let (upcoming, past): (Vec<&ShowDetail>, Vec<&ShowDetail>) = shows
        .iter()
        .partition(|show| is_upcoming(show.start_time, now));

    let past_shows: Vec<T> = past.into_iter().map(&view).collect();
    let upcoming_shows: Vec<T> = upcoming.into_iter().map(&view).collect();

    PartitionedShows {
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}
