//! Shapes loaded rows into the typed views the pages render.
//!
//! Everything here is pure: the caller loads the rows and passes the current
//! time, so past/upcoming classification can be tested with a fixed clock.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;

use super::model::{
    Area, ArtistListItem, ArtistSummary, Schedule, ShowAppearance, ShowListItem, VenueSummary,
};
use super::{Artist, Id, Venue};

/// `(start_time, counterpart_id, counterpart_name, counterpart_image_link)`
pub type AppearanceRow = (NaiveDateTime, Id, String, Option<String>);

/// `(venue_id, venue_name, artist_id, artist_name, artist_image_link, start_time)`
pub type ShowRow = (Id, String, Id, String, Option<String>, NaiveDateTime);

/// A show starting exactly now counts as upcoming, so past and upcoming
/// always partition the shows.
pub fn is_upcoming(start_time: NaiveDateTime, now: NaiveDateTime) -> bool {
    start_time >= now
}

pub fn format_start_time(start_time: NaiveDateTime) -> String {
    start_time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Counts upcoming shows per owner, given `(owner_id, start_time)` pairs.
pub fn upcoming_counts<I>(shows: I, now: NaiveDateTime) -> HashMap<Id, usize>
where
    I: IntoIterator<Item = (Id, NaiveDateTime)>,
{
    let mut counts = HashMap::new();
    for (owner, start_time) in shows {
        if is_upcoming(start_time, now) {
            *counts.entry(owner).or_insert(0) += 1;
        }
    }
    counts
}

pub fn schedule(rows: Vec<AppearanceRow>, now: NaiveDateTime) -> Schedule {
    let mut schedule = Schedule::default();

    for (start_time, counterpart_id, counterpart_name, counterpart_image_link) in rows {
        let appearance = ShowAppearance {
            counterpart_id,
            counterpart_name,
            counterpart_image_link,
            start_time: format_start_time(start_time),
        };

        if is_upcoming(start_time, now) {
            schedule.upcoming_shows.push(appearance);
        } else {
            schedule.past_shows.push(appearance);
        }
    }

    schedule.past_shows_count = schedule.past_shows.len();
    schedule.upcoming_shows_count = schedule.upcoming_shows.len();
    schedule
}

pub fn venue_summaries(venues: Vec<(Id, Venue)>, counts: &HashMap<Id, usize>) -> Vec<VenueSummary> {
    venues
        .into_iter()
        .map(|(id, venue)| VenueSummary {
            id,
            name: venue.name,
            num_upcoming_shows: counts.get(&id).copied().unwrap_or(0),
        })
        .collect()
}

pub fn artist_summaries(
    artists: Vec<(Id, Artist)>,
    counts: &HashMap<Id, usize>,
) -> Vec<ArtistSummary> {
    artists
        .into_iter()
        .map(|(id, artist)| ArtistSummary {
            id,
            name: artist.name,
            num_upcoming_shows: counts.get(&id).copied().unwrap_or(0),
        })
        .collect()
}

/// Groups venues by exact `(city, state)`. Areas come out ordered by state,
/// then city; venues keep their input order.
pub fn group_by_area(venues: Vec<(Id, Venue)>, counts: &HashMap<Id, usize>) -> Vec<Area> {
    let mut areas: BTreeMap<(String, String), Vec<VenueSummary>> = BTreeMap::new();

    for (id, venue) in venues {
        let summary = VenueSummary {
            id,
            name: venue.name,
            num_upcoming_shows: counts.get(&id).copied().unwrap_or(0),
        };
        areas
            .entry((venue.state, venue.city))
            .or_default()
            .push(summary);
    }

    areas
        .into_iter()
        .map(|((state, city), venues)| Area {
            city,
            state,
            venues,
        })
        .collect()
}

pub fn artist_list(artists: Vec<(Id, Artist)>) -> Vec<ArtistListItem> {
    artists
        .into_iter()
        .map(|(id, artist)| ArtistListItem {
            id,
            name: artist.name,
        })
        .collect()
}

pub fn show_list(rows: Vec<ShowRow>) -> Vec<ShowListItem> {
    rows.into_iter()
        .map(
            |(venue_id, venue_name, artist_id, artist_name, artist_image_link, start_time)| {
                ShowListItem {
                    venue_id,
                    venue_name,
                    artist_id,
                    artist_name,
                    artist_image_link,
                    start_time: format_start_time(start_time),
                }
            },
        )
        .collect()
}
