//! Submitted forms and their validation.
//!
//! The raw forms parse leniently: every field is optional so a missing value
//! reaches `validate` and is reported next to the field, instead of failing
//! the whole request.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use url::Url;

use crate::store::{Artist, Id, Show, Venue};

pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR",
    "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

const START_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

const REQUIRED: &str = "This field is required.";

/// Field-level validation failures, keyed by field name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Trimmed value, or an empty string and a recorded error when missing.
    fn required(&mut self, field: &'static str, value: Option<String>) -> String {
        match present(value) {
            Some(v) => v,
            None => {
                self.add(field, REQUIRED);
                String::new()
            }
        }
    }

    fn state(&mut self, value: Option<String>) -> String {
        let state = self.required("state", value);
        if !state.is_empty() && !STATES.contains(&state.as_str()) {
            self.add("state", "Not a valid choice.");
        }
        state
    }

    fn genres(&mut self, values: Vec<String>) -> Vec<String> {
        let genres: Vec<String> = values.into_iter().filter_map(|v| present(Some(v))).collect();
        if genres.iter().any(|g| !GENRES.contains(&g.as_str())) {
            self.add("genres", "Not a valid choice.");
        }
        genres
    }

    fn url(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        let value = present(value)?;
        match Url::parse(&value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {}
            _ => self.add(field, "Invalid URL."),
        }
        Some(value)
    }

    fn id(&mut self, field: &'static str, value: Option<String>) -> Id {
        let raw = self.required(field, value);
        if raw.is_empty() {
            return 0;
        }
        raw.parse().unwrap_or_else(|_| {
            self.add(field, "Not a valid integer value.");
            0
        })
    }

    fn start_time(&mut self, value: Option<String>) -> Option<NaiveDateTime> {
        let raw = self.required("start_time", value);
        if raw.is_empty() {
            return None;
        }
        let parsed = START_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&raw, format).ok());
        if parsed.is_none() {
            self.add("start_time", "Not a valid datetime value.");
        }
        parsed
    }

    fn finish<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(" "))?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn flag(value: Option<String>) -> bool {
    value.as_deref() == Some("y")
}

#[derive(FromForm, Debug, Default)]
pub struct SearchForm {
    pub search_term: Option<String>,
}

impl SearchForm {
    pub fn term(&self) -> String {
        self.search_term.clone().unwrap_or_default()
    }
}

#[derive(FromForm, Debug, Default)]
pub struct VenueForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn validate(self) -> Result<Venue, FormErrors> {
        let mut errors = FormErrors::default();

        let venue = Venue {
            name: errors.required("name", self.name),
            city: errors.required("city", self.city),
            state: errors.state(self.state),
            address: Some(errors.required("address", self.address)),
            phone: Some(errors.required("phone", self.phone)),
            genres: errors.genres(self.genres),
            image_link: errors.url("image_link", self.image_link),
            facebook_link: errors.url("facebook_link", self.facebook_link),
            website: errors.url("website_link", self.website_link),
            seeking_talent: flag(self.seeking_talent),
            seeking_description: present(self.seeking_description),
        };

        errors.finish(venue)
    }
}

#[derive(FromForm, Debug, Default)]
pub struct ArtistForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn validate(self) -> Result<Artist, FormErrors> {
        let mut errors = FormErrors::default();

        let artist = Artist {
            name: errors.required("name", self.name),
            city: errors.required("city", self.city),
            state: errors.state(self.state),
            phone: Some(errors.required("phone", self.phone)),
            genres: errors.genres(self.genres),
            image_link: errors.url("image_link", self.image_link),
            facebook_link: errors.url("facebook_link", self.facebook_link),
            website: errors.url("website_link", self.website_link),
            seeking_venue: flag(self.seeking_venue),
            seeking_description: present(self.seeking_description),
        };

        errors.finish(artist)
    }
}

#[derive(FromForm, Debug, Default)]
pub struct ShowForm {
    pub artist_id: Option<String>,
    pub venue_id: Option<String>,
    pub start_time: Option<String>,
}

impl ShowForm {
    pub fn validate(self) -> Result<Show, FormErrors> {
        let mut errors = FormErrors::default();

        let artist_id = errors.id("artist_id", self.artist_id);
        let venue_id = errors.id("venue_id", self.venue_id);
        let start_time = errors.start_time(self.start_time);

        match start_time {
            Some(start_time) if errors.is_empty() => Ok(Show {
                venue_id,
                artist_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}
