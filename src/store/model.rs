use chrono::NaiveDateTime;

use super::Id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    pub venue_id: Id,
    pub artist_id: Id,
    pub start_time: NaiveDateTime,
}

// Views

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueSummary {
    pub id: Id,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistSummary {
    pub id: Id,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistListItem {
    pub id: Id,
    pub name: String,
}

/// Venues sharing the exact same city and state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for SearchResults<T> {
    fn from(data: Vec<T>) -> Self {
        SearchResults {
            count: data.len(),
            data,
        }
    }
}

/// A show seen from one side of it: for a venue the counterpart is the
/// artist, for an artist it is the venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowAppearance {
    pub counterpart_id: Id,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    pub past_shows: Vec<ShowAppearance>,
    pub upcoming_shows: Vec<ShowAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueDetail {
    pub id: Id,
    pub venue: Venue,
    pub schedule: Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistDetail {
    pub id: Id,
    pub artist: Artist,
    pub schedule: Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowListItem {
    pub venue_id: Id,
    pub venue_name: String,
    pub artist_id: Id,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}
