use serde::Serialize;
use sqlx::FromRow;

pub mod artist;
pub mod show;
pub mod venue;

pub use artist::{Artist, ArtistFields, ArtistName, ArtistView};
pub use show::{Show, ShowDetail, ShowFields, ShowListing};
pub use venue::{Area, Venue, VenueFields, VenueView};

/// A venue or artist annotated with how many of its shows are still ahead.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UpcomingSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for SearchResults<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}
