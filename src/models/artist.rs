use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::show::{partition_shows, ArtistShow, PartitionedShows, ShowDetail};
use crate::utils::error::AppError;
use crate::utils::form::FormData;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistFields {
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

impl TryFrom<FormData> for ArtistFields {
    type Error = AppError;

    fn try_from(form: FormData) -> Result<Self, Self::Error> {
        Ok(Self {
            name: form.required("name")?,
            genres: form.all("genres"),
            city: form.required("city")?,
            state: form.required("state")?,
            phone: form.optional("phone"),
            website: form.optional("website"),
            facebook_link: form.optional("facebook_link"),
            seeking_venue: form.flag("seeking_venue"),
            seeking_description: form.optional("seeking_description"),
            image_link: form.optional("image_link"),
        })
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ArtistName {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistView {
    #[serde(flatten)]
    pub artist: Artist,
    #[serde(flatten)]
    pub shows: PartitionedShows<ArtistShow>,
}

impl ArtistView {
    pub fn new(artist: Artist, shows: &[ShowDetail], now: DateTime<Utc>) -> Self {
        Self {
            artist,
            shows: partition_shows(shows, now, ShowDetail::for_artist),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn artist() -> Artist {
        Artist {
            id: 5,
            name: "Matt Quevedo".to_string(),
            genres: vec!["Jazz".to_string()],
            city: "New York".to_string(),
            state: "NY".to_string(),
            phone: None,
            website: None,
            facebook_link: None,
            seeking_venue: false,
            seeking_description: None,
            image_link: None,
        }
    }

    fn show_at(id: i32, start_time: DateTime<Utc>) -> ShowDetail {
        ShowDetail {
            id,
            start_time,
            artist_id: 5,
            artist_name: "Matt Quevedo".to_string(),
            artist_image_link: None,
            venue_id: 3,
            venue_name: "Park Square Live Music & Coffee".to_string(),
            venue_image_link: Some("https://img.example/park.jpg".to_string()),
        }
    }

    #[test]
    fn test_artist_view_serializes_flat() {
        let now = Utc::now();
        let shows = vec![show_at(1, now - Duration::days(1)), show_at(2, now + Duration::days(1))];

        let view = ArtistView::new(artist(), &shows, now);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["name"], "Matt Quevedo");
        assert_eq!(json["past_shows_count"], 1);
        assert_eq!(json["upcoming_shows_count"], 1);
        assert_eq!(json["upcoming_shows"][0]["venue_id"], 3);
        assert_eq!(json["past_shows"][0]["venue_name"], "Park Square Live Music & Coffee");
        assert!(json["upcoming_shows"][0].get("artist_id").is_none());
    }

    #[test]
    fn test_artist_fields_seeking_venue_defaults_off() {
        let form = FormData::from(vec![
            ("name".to_string(), "The Wild Sax Band".to_string()),
            ("city".to_string(), "San Francisco".to_string()),
            ("state".to_string(), "CA".to_string()),
        ]);

        let fields = ArtistFields::try_from(form).unwrap();

        assert!(!fields.seeking_venue);
        assert!(fields.genres.is_empty());
    }

    #[test]
    fn test_artist_fields_require_name() {
        let form = FormData::from(vec![
            ("city".to_string(), "San Francisco".to_string()),
            ("state".to_string(), "CA".to_string()),
        ]);
        assert!(ArtistFields::try_from(form).is_err());
    }
}
