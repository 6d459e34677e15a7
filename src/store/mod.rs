mod db;
#[macro_use]
pub mod action;
pub mod model;
pub mod projection;

use std::collections::HashMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rocket::fairing::{self, Fairing, Info, Kind};
use rocket::request::{FromRequest, Outcome, Request};
use rocket::{Build, Orbit, Rocket};
use tracing::info;

use crate::error::{Error, Result};
use crate::schema::{artists, shows, venues};
use action::Actions;
use db::{NewSqlArtist, NewSqlShow, NewSqlVenue, SqlArtist, SqlShow, SqlVenue};
use projection::{AppearanceRow, ShowRow};

pub use model::{
    Area, Artist, ArtistDetail, ArtistListItem, ArtistSummary, SearchResults, Show, ShowListItem,
    Venue, VenueDetail, VenueSummary,
};

pub type Id = i32;

mod venue_actions {
    use super::*;

    derive_actions!(Venue, SqlVenue, NewSqlVenue, venues, venue_id);
}

mod artist_actions {
    use super::*;

    derive_actions!(Artist, SqlArtist, NewSqlArtist, artists, artist_id);
}

/// Request-scoped handle on one pooled connection. The connection goes back
/// to the pool when the `Store` is dropped at the end of the request.
pub struct Store(db::Connection);

impl Store {
    pub fn fairing() -> StoreFairing {
        StoreFairing
    }

    /// Runs `mutation` in a single immediate transaction: committed when it
    /// returns `Ok`, rolled back when it returns `Err`.
    ///
    /// `BEGIN IMMEDIATE` takes the write lock before the first read, so a
    /// check made inside `mutation` still holds when it writes.
    pub async fn persist<T, F>(&self, mutation: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.0
            .run(move |c| c.immediate_transaction(mutation))
            .await
    }

    // Reads

    pub async fn areas(&self, now: NaiveDateTime) -> Result<Vec<Area>> {
        self.0
            .run(move |c| {
                let venues = Venue::all(c)?;
                let counts = upcoming_by_venue(c, now)?;
                Ok(projection::group_by_area(venues, &counts))
            })
            .await
    }

    pub async fn search_venues(
        &self,
        term: String,
        now: NaiveDateTime,
    ) -> Result<SearchResults<VenueSummary>> {
        self.0
            .run(move |c| {
                let venues = Venue::search(c, &term)?;
                let counts = upcoming_by_venue(c, now)?;
                Ok(projection::venue_summaries(venues, &counts).into())
            })
            .await
    }

    pub async fn venue(&self, id: Id) -> Result<Venue> {
        self.0.run(move |c| Ok(Venue::read(c, id)?)).await
    }

    pub async fn venue_detail(&self, id: Id, now: NaiveDateTime) -> Result<VenueDetail> {
        self.0
            .run(move |c| {
                let sql_venue: SqlVenue = venues::table
                    .find(id)
                    .select(SqlVenue::as_select())
                    .first(c)?;

                let rows: Vec<AppearanceRow> = SqlShow::belonging_to(&sql_venue)
                    .inner_join(artists::table)
                    .select((
                        shows::start_time,
                        artists::id,
                        artists::name,
                        artists::image_link,
                    ))
                    .order(shows::start_time)
                    .load(c)?;

                let (id, venue): (Id, Venue) = sql_venue.into();
                Ok(VenueDetail {
                    id,
                    venue,
                    schedule: projection::schedule(rows, now),
                })
            })
            .await
    }

    pub async fn artists(&self) -> Result<Vec<ArtistListItem>> {
        self.0
            .run(|c| Ok(projection::artist_list(Artist::all(c)?)))
            .await
    }

    pub async fn search_artists(
        &self,
        term: String,
        now: NaiveDateTime,
    ) -> Result<SearchResults<ArtistSummary>> {
        self.0
            .run(move |c| {
                let artists = Artist::search(c, &term)?;
                let counts = upcoming_by_artist(c, now)?;
                Ok(projection::artist_summaries(artists, &counts).into())
            })
            .await
    }

    pub async fn artist(&self, id: Id) -> Result<Artist> {
        self.0.run(move |c| Ok(Artist::read(c, id)?)).await
    }

    pub async fn artist_detail(&self, id: Id, now: NaiveDateTime) -> Result<ArtistDetail> {
        self.0
            .run(move |c| {
                let sql_artist: SqlArtist = artists::table
                    .find(id)
                    .select(SqlArtist::as_select())
                    .first(c)?;

                let rows: Vec<AppearanceRow> = SqlShow::belonging_to(&sql_artist)
                    .inner_join(venues::table)
                    .select((
                        shows::start_time,
                        venues::id,
                        venues::name,
                        venues::image_link,
                    ))
                    .order(shows::start_time)
                    .load(c)?;

                let (id, artist): (Id, Artist) = sql_artist.into();
                Ok(ArtistDetail {
                    id,
                    artist,
                    schedule: projection::schedule(rows, now),
                })
            })
            .await
    }

    /// Shows whose venue or artist row is gone are left out.
    pub async fn shows(&self) -> Result<Vec<ShowListItem>> {
        self.0
            .run(|c| {
                let rows: Vec<ShowRow> = shows::table
                    .inner_join(venues::table)
                    .inner_join(artists::table)
                    .select((
                        shows::venue_id,
                        venues::name,
                        shows::artist_id,
                        artists::name,
                        artists::image_link,
                        shows::start_time,
                    ))
                    .order((shows::start_time, shows::id))
                    .load(c)?;

                Ok(projection::show_list(rows))
            })
            .await
    }

    // Writes

    /// Rejects the venue if an existing venue name contains its name.
    pub async fn create_venue(&self, venue: Venue) -> Result<Id> {
        self.persist(move |c| {
            if !Venue::search(c, &venue.name)?.is_empty() {
                return Err(Error::Duplicate {
                    kind: "Venue",
                    name: venue.name,
                });
            }
            Ok(Venue::create(c, venue)?)
        })
        .await
    }

    pub async fn update_venue(&self, id: Id, venue: Venue) -> Result<Venue> {
        self.persist(move |c| Ok(Venue::update(c, id, venue)?))
            .await
    }

    pub async fn delete_venue(&self, id: Id) -> Result<Venue> {
        self.persist(move |c| Ok(Venue::delete(c, id)?)).await
    }

    /// Rejects the artist if an existing artist name contains its name.
    pub async fn create_artist(&self, artist: Artist) -> Result<Id> {
        self.persist(move |c| {
            if !Artist::search(c, &artist.name)?.is_empty() {
                return Err(Error::Duplicate {
                    kind: "Artist",
                    name: artist.name,
                });
            }
            Ok(Artist::create(c, artist)?)
        })
        .await
    }

    pub async fn update_artist(&self, id: Id, artist: Artist) -> Result<Artist> {
        self.persist(move |c| Ok(Artist::update(c, id, artist)?))
            .await
    }

    pub async fn delete_artist(&self, id: Id) -> Result<Artist> {
        self.persist(move |c| Ok(Artist::delete(c, id)?)).await
    }

    pub async fn create_show(&self, show: Show) -> Result<Id> {
        self.persist(move |c| {
            let venue_count: i64 = venues::table
                .find(show.venue_id)
                .count()
                .get_result(c)?;
            if venue_count == 0 {
                return Err(Error::MissingReference {
                    kind: "Venue",
                    id: show.venue_id,
                });
            }

            let artist_count: i64 = artists::table
                .find(show.artist_id)
                .count()
                .get_result(c)?;
            if artist_count == 0 {
                return Err(Error::MissingReference {
                    kind: "Artist",
                    id: show.artist_id,
                });
            }

            diesel::insert_into(shows::table)
                .values(&NewSqlShow::from(show))
                .execute(c)?;

            Ok(action::last_insert_id(c)?)
        })
        .await
    }
}

fn upcoming_by_venue(
    c: &mut SqliteConnection,
    now: NaiveDateTime,
) -> QueryResult<HashMap<Id, usize>> {
    let rows: Vec<(Id, NaiveDateTime)> = shows::table
        .select((shows::venue_id, shows::start_time))
        .load(c)?;
    Ok(projection::upcoming_counts(rows, now))
}

fn upcoming_by_artist(
    c: &mut SqliteConnection,
    now: NaiveDateTime,
) -> QueryResult<HashMap<Id, usize>> {
    let rows: Vec<(Id, NaiveDateTime)> = shows::table
        .select((shows::artist_id, shows::start_time))
        .load(c)?;
    Ok(projection::upcoming_counts(rows, now))
}

pub struct StoreFairing;

#[rocket::async_trait]
impl Fairing for StoreFairing {
    fn info(&self) -> Info {
        Info {
            name: "Fyyur Store Fairing",
            kind: Kind::Ignite | Kind::Shutdown,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> fairing::Result {
        let rocket = db::Connection::fairing().on_ignite(rocket).await?;
        db::initialize(rocket).await
    }

    async fn on_shutdown(&self, _rocket: &Rocket<Orbit>) {
        info!("closing database pool");
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Store {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        db::Connection::from_request(request).await.map(Store)
    }
}
