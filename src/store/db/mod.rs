use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use rocket::{fairing, Build, Rocket};
use rocket_sync_db_pools::database;
use tracing::{error, info};

use super::{Artist, Id, Show, Venue};
use crate::schema::{artists, shows, venues};

#[database("fyyur")]
pub struct Connection(diesel::SqliteConnection);

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub async fn initialize(rocket: Rocket<Build>) -> fairing::Result {
    let conn = match Connection::get_one(&rocket).await {
        Some(conn) => conn,
        None => {
            error!("Database connection failed.");
            return Err(rocket);
        }
    };

    let migrated = conn
        .run(|c| {
            c.run_pending_migrations(MIGRATIONS)
                .map(|applied| applied.len())
                .map_err(|e| e.to_string())
        })
        .await;

    match migrated {
        Ok(count) => {
            info!(count, "database migrations applied");
            Ok(rocket)
        }
        Err(e) => {
            error!("Failed to run database migrations: {}", e);
            Err(rocket)
        }
    }
}

fn encode_genres(genres: &[String]) -> String {
    serde_json::to_string(genres).unwrap_or_else(|_| String::from("[]"))
}

fn decode_genres(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

#[derive(Queryable, Selectable, Identifiable, Clone, Debug, PartialEq)]
#[diesel(table_name = venues)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SqlVenue {
    pub id: Id,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Insertable, AsChangeset, Debug)]
#[diesel(table_name = venues)]
#[diesel(treat_none_as_null = true)]
pub struct NewSqlVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl From<SqlVenue> for (Id, Venue) {
    fn from(venue: SqlVenue) -> (Id, Venue) {
        (
            venue.id,
            Venue {
                genres: decode_genres(&venue.genres),
                name: venue.name,
                city: venue.city,
                state: venue.state,
                address: venue.address,
                phone: venue.phone,
                image_link: venue.image_link,
                facebook_link: venue.facebook_link,
                website: venue.website,
                seeking_talent: venue.seeking_talent,
                seeking_description: venue.seeking_description,
            },
        )
    }
}

impl From<Venue> for NewSqlVenue {
    fn from(venue: Venue) -> NewSqlVenue {
        NewSqlVenue {
            genres: encode_genres(&venue.genres),
            name: venue.name,
            city: venue.city,
            state: venue.state,
            address: venue.address,
            phone: venue.phone,
            image_link: venue.image_link,
            facebook_link: venue.facebook_link,
            website: venue.website,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Clone, Debug, PartialEq)]
#[diesel(table_name = artists)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SqlArtist {
    pub id: Id,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Insertable, AsChangeset, Debug)]
#[diesel(table_name = artists)]
#[diesel(treat_none_as_null = true)]
pub struct NewSqlArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl From<SqlArtist> for (Id, Artist) {
    fn from(artist: SqlArtist) -> (Id, Artist) {
        (
            artist.id,
            Artist {
                genres: decode_genres(&artist.genres),
                name: artist.name,
                city: artist.city,
                state: artist.state,
                phone: artist.phone,
                image_link: artist.image_link,
                facebook_link: artist.facebook_link,
                website: artist.website,
                seeking_venue: artist.seeking_venue,
                seeking_description: artist.seeking_description,
            },
        )
    }
}

impl From<Artist> for NewSqlArtist {
    fn from(artist: Artist) -> NewSqlArtist {
        NewSqlArtist {
            genres: encode_genres(&artist.genres),
            name: artist.name,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            image_link: artist.image_link,
            facebook_link: artist.facebook_link,
            website: artist.website,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Associations, Clone, Debug, PartialEq)]
#[diesel(belongs_to(SqlVenue, foreign_key = venue_id))]
#[diesel(belongs_to(SqlArtist, foreign_key = artist_id))]
#[diesel(table_name = shows)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SqlShow {
    pub id: Id,
    pub venue_id: Id,
    pub artist_id: Id,
    pub start_time: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = shows)]
pub struct NewSqlShow {
    pub venue_id: Id,
    pub artist_id: Id,
    pub start_time: NaiveDateTime,
}

impl From<Show> for NewSqlShow {
    fn from(show: Show) -> NewSqlShow {
        NewSqlShow {
            venue_id: show.venue_id,
            artist_id: show.artist_id,
            start_time: show.start_time,
        }
    }
}
