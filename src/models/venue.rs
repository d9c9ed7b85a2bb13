use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::show::{partition_shows, PartitionedShows, ShowDetail, VenueShow};
use crate::models::UpcomingSummary;
use crate::utils::error::AppError;
use crate::utils::form::FormData;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

/// Every mutable column of a venue, validated from the venue form.
/// Updates overwrite the whole record with these values.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueFields {
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

impl TryFrom<FormData> for VenueFields {
    type Error = AppError;

    fn try_from(form: FormData) -> Result<Self, Self::Error> {
        Ok(Self {
            name: form.required("name")?,
            genres: form.all("genres"),
            address: form.required("address")?,
            city: form.required("city")?,
            state: form.required("state")?,
            phone: form.optional("phone"),
            website: form.optional("website"),
            facebook_link: form.optional("facebook_link"),
            seeking_talent: form.flag("seeking_talent"),
            seeking_description: form.optional("seeking_description"),
            image_link: form.optional("image_link"),
        })
    }
}

/// A venue with its upcoming-show count and location, as read for the area listing.
#[derive(Debug, Clone, FromRow)]
pub struct VenueAreaRow {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<UpcomingSummary>,
}

/// Groups venues by their (city, state) pair.
///
/// Areas come out ordered by city then state, venues inside an area by
/// name then id, regardless of the order rows were read in.
pub fn group_by_area(rows: Vec<VenueAreaRow>) -> Vec<Area> {
    let mut areas: BTreeMap<(String, String), Vec<UpcomingSummary>> = BTreeMap::new();

    for row in rows {
        areas
            .entry((row.city, row.state))
            .or_default()
            .push(UpcomingSummary {
                id: row.id,
                name: row.name,
                num_upcoming_shows: row.num_upcoming_shows,
            });
    }

    areas
        .into_iter()
        .map(|((city, state), mut venues)| {
            venues.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            Area {
                city,
                state,
                venues,
            }
        })
        .collect()
}

/// The venue page: the stored record plus its shows split around `now`.
#[derive(Debug, Clone, Serialize)]
pub struct VenueView {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(flatten)]
    pub shows: PartitionedShows<VenueShow>,
}

impl VenueView {
    pub fn new(venue: Venue, shows: &[ShowDetail], now: DateTime<Utc>) -> Self {
        Self {
            venue,
            shows: partition_shows(shows, now, ShowDetail::for_venue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i32, name: &str, city: &str, state: &str, upcoming: i64) -> VenueAreaRow {
        VenueAreaRow {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            num_upcoming_shows: upcoming,
        }
    }

    #[test]
    fn test_group_by_area_partitions_venues() {
        let rows = vec![
            row(1, "The Musical Hop", "San Francisco", "CA", 0),
            row(3, "Park Square Live Music & Coffee", "San Francisco", "CA", 1),
            row(2, "The Dueling Pianos Bar", "New York", "NY", 2),
        ];

        let areas = group_by_area(rows);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "New York");
        assert_eq!(areas[0].venues.len(), 1);
        assert_eq!(areas[0].venues[0].num_upcoming_shows, 2);

        assert_eq!((areas[1].city.as_str(), areas[1].state.as_str()), ("San Francisco", "CA"));
        let ids: Vec<i32> = areas[1].venues.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_same_city_in_different_states_are_distinct_areas() {
        let rows = vec![
            row(1, "A", "Portland", "OR", 0),
            row(2, "B", "Portland", "ME", 0),
        ];

        let areas = group_by_area(rows);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].state, "ME");
        assert_eq!(areas[1].state, "OR");
    }

    #[test]
    fn test_every_venue_lands_in_exactly_one_area() {
        let rows: Vec<VenueAreaRow> = (1..=12)
            .map(|id| {
                let (city, state) = match id % 3 {
                    0 => ("Austin", "TX"),
                    1 => ("Boston", "MA"),
                    _ => ("Chicago", "IL"),
                };
                row(id, &format!("Venue {id}"), city, state, 0)
            })
            .collect();

        let areas = group_by_area(rows);

        let mut seen: Vec<i32> = areas
            .iter()
            .flat_map(|area| area.venues.iter().map(|v| v.id))
            .collect();
        seen.sort();
        assert_eq!(seen, (1..=12).collect::<Vec<_>>());
        assert_eq!(areas.len(), 3);
    }

    #[test]
    fn test_group_by_area_empty() {
        assert!(group_by_area(Vec::new()).is_empty());
    }

    #[test]
    fn test_venue_fields_require_address() {
        let form = FormData::from(vec![
            ("name".to_string(), "The Musical Hop".to_string()),
            ("city".to_string(), "San Francisco".to_string()),
            ("state".to_string(), "CA".to_string()),
        ]);
        assert!(matches!(
            VenueFields::try_from(form),
            Err(AppError::ValidationError(msg)) if msg.contains("address")
        ));
    }

    #[test]
    fn test_venue_fields_from_form() {
        let form = FormData::from(vec![
            ("name".to_string(), "The Musical Hop".to_string()),
            ("genres".to_string(), "Jazz".to_string()),
            ("genres".to_string(), "Reggae".to_string()),
            ("address".to_string(), "1015 Folsom Street".to_string()),
            ("city".to_string(), "San Francisco".to_string()),
            ("state".to_string(), "CA".to_string()),
            ("phone".to_string(), "".to_string()),
            ("seeking_talent".to_string(), "y".to_string()),
        ]);

        let fields = VenueFields::try_from(form).unwrap();

        assert_eq!(fields.genres, vec!["Jazz", "Reggae"]);
        assert_eq!(fields.phone, None);
        assert!(fields.seeking_talent);
    }
}
