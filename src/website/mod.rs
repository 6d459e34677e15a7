pub mod pages;

use chrono::{Local, NaiveDateTime};
use maud::Markup;
use rocket::form::Form;
use rocket::http::uri::Origin;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::{Build, Rocket};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::form::{ArtistForm, SearchForm, ShowForm, VenueForm};
use crate::store::{Id, Store};
use pages::Notice;

pub fn mount(rocket: Rocket<Build>, prefix: &'static str) -> Rocket<Build> {
    rocket
        .mount(
            prefix,
            routes![
                home,
                venues,
                search_venues,
                show_venue,
                create_venue_form,
                create_venue,
                delete_venue,
                edit_venue_form,
                edit_venue,
                artists,
                search_artists,
                show_artist,
                delete_artist,
                edit_artist_form,
                edit_artist,
                create_artist_form,
                create_artist,
                shows,
                create_show_form,
                create_show,
            ],
        )
        .register(prefix, catchers![not_found, server_error])
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// What a form submission answers with: a rendered page, or a redirect
/// carrying a flash message.
#[derive(Responder)]
pub enum Submission {
    Page(Markup),
    Redirect(Flash<Redirect>),
}

/// Reports the outcome of a creation. Invalid input and duplicates send the
/// user back to the form; everything else ends on the home page with a notice.
fn created(
    result: Result<Id>,
    kind: &str,
    name: Option<&str>,
    form: Origin<'static>,
) -> Submission {
    let subject = match name {
        Some(name) => format!("{} {}", kind, name),
        None => kind.to_string(),
    };

    match result {
        Ok(id) => {
            info!(id, "{} created", subject);
            Submission::Page(pages::home(Some(Notice::Success(format!(
                "{} was successfully listed!",
                subject
            )))))
        }
        Err(e @ (Error::Validation(_) | Error::Duplicate { .. })) => {
            Submission::Redirect(Flash::error(Redirect::to(form), e.to_string()))
        }
        Err(e) => {
            warn!("Error {} with inserting {}", e, subject);
            let target = match name {
                Some(name) => format!("{} {}", kind.to_lowercase(), name),
                None => kind.to_lowercase(),
            };
            Submission::Page(pages::home(Some(Notice::Error(format!(
                "Error {} with inserting {}.",
                e, target
            )))))
        }
    }
}

/// Reports the outcome of an update. Invalid input goes back to the edit
/// form, a missing record is a 404, the rest lands on the detail page.
fn updated<T>(
    result: Result<T>,
    kind: &str,
    name: Option<&str>,
    detail: Origin<'static>,
    form: Origin<'static>,
) -> Result<Flash<Redirect>> {
    let name = name.unwrap_or_default();
    match result {
        Ok(_) => Ok(Flash::success(
            Redirect::to(detail),
            format!("{} {} successfully updated!", kind, name),
        )),
        Err(e @ Error::Validation(_)) => Ok(Flash::error(Redirect::to(form), e.to_string())),
        Err(Error::NotFound) => Err(Error::NotFound),
        Err(e) => {
            warn!("Error {} with editing {} {}", e, kind.to_lowercase(), name);
            Ok(Flash::error(
                Redirect::to(detail),
                format!("Error {} with editing {} {}.", e, kind.to_lowercase(), name),
            ))
        }
    }
}

#[get("/")]
fn home(flash: Option<FlashMessage<'_>>) -> Markup {
    pages::home(flash.map(Notice::from))
}

//  Venues

#[get("/venues")]
async fn venues(store: Store) -> Result<Markup> {
    let areas = store.areas(now()).await?;
    Ok(pages::venues(&areas))
}

#[post("/venues/search", data = "<form>")]
async fn search_venues(store: Store, form: Form<SearchForm>) -> Result<Markup> {
    let term = form.term();
    let results = store.search_venues(term.clone(), now()).await?;
    Ok(pages::search_venues(&term, &results))
}

#[get("/venues/<id>")]
async fn show_venue(store: Store, id: Id, flash: Option<FlashMessage<'_>>) -> Result<Markup> {
    let venue = store.venue_detail(id, now()).await?;
    Ok(pages::venue_detail(&venue, flash.map(Notice::from)))
}

#[get("/venues/create")]
fn create_venue_form(flash: Option<FlashMessage<'_>>) -> Markup {
    pages::venue_form(None, flash.map(Notice::from))
}

#[post("/venues/create", data = "<form>")]
async fn create_venue(store: Store, form: Form<VenueForm>) -> Submission {
    let (name, result) = match form.into_inner().validate() {
        Ok(venue) => (Some(venue.name.clone()), store.create_venue(venue).await),
        Err(errors) => (None, Err(errors.into())),
    };
    created(result, "Venue", name.as_deref(), uri!(create_venue_form))
}

/// Best-effort: failures are logged, the response is empty either way.
#[delete("/venues/<id>")]
async fn delete_venue(store: Store, id: Id) {
    match store.delete_venue(id).await {
        Ok(venue) => info!(id, "venue {} deleted", venue.name),
        Err(e) => warn!(id, "Error {}", e),
    }
}

#[get("/venues/<id>/edit")]
async fn edit_venue_form(store: Store, id: Id, flash: Option<FlashMessage<'_>>) -> Result<Markup> {
    let venue = store.venue(id).await?;
    Ok(pages::venue_form(Some((id, &venue)), flash.map(Notice::from)))
}

#[post("/venues/<id>/edit", data = "<form>")]
async fn edit_venue(store: Store, id: Id, form: Form<VenueForm>) -> Result<Flash<Redirect>> {
    let (name, result) = match form.into_inner().validate() {
        Ok(venue) => (Some(venue.name.clone()), store.update_venue(id, venue).await),
        Err(errors) => (None, Err(errors.into())),
    };
    updated(
        result,
        "Venue",
        name.as_deref(),
        uri!(show_venue(id)),
        uri!(edit_venue_form(id)),
    )
}

//  Artists

#[get("/artists")]
async fn artists(store: Store) -> Result<Markup> {
    let artists = store.artists().await?;
    Ok(pages::artists(&artists))
}

#[post("/artists/search", data = "<form>")]
async fn search_artists(store: Store, form: Form<SearchForm>) -> Result<Markup> {
    let term = form.term();
    let results = store.search_artists(term.clone(), now()).await?;
    Ok(pages::search_artists(&term, &results))
}

#[get("/artists/<id>")]
async fn show_artist(store: Store, id: Id, flash: Option<FlashMessage<'_>>) -> Result<Markup> {
    let artist = store.artist_detail(id, now()).await?;
    Ok(pages::artist_detail(&artist, flash.map(Notice::from)))
}

/// Best-effort: failures are logged, the response is empty either way.
#[delete("/artists/<id>")]
async fn delete_artist(store: Store, id: Id) {
    match store.delete_artist(id).await {
        Ok(artist) => info!(id, "artist {} deleted", artist.name),
        Err(e) => warn!(id, "Error {}", e),
    }
}

#[get("/artists/<id>/edit")]
async fn edit_artist_form(store: Store, id: Id, flash: Option<FlashMessage<'_>>) -> Result<Markup> {
    let artist = store.artist(id).await?;
    Ok(pages::artist_form(Some((id, &artist)), flash.map(Notice::from)))
}

#[post("/artists/<id>/edit", data = "<form>")]
async fn edit_artist(store: Store, id: Id, form: Form<ArtistForm>) -> Result<Flash<Redirect>> {
    let (name, result) = match form.into_inner().validate() {
        Ok(artist) => (Some(artist.name.clone()), store.update_artist(id, artist).await),
        Err(errors) => (None, Err(errors.into())),
    };
    updated(
        result,
        "Artist",
        name.as_deref(),
        uri!(show_artist(id)),
        uri!(edit_artist_form(id)),
    )
}

#[get("/artists/create")]
fn create_artist_form(flash: Option<FlashMessage<'_>>) -> Markup {
    pages::artist_form(None, flash.map(Notice::from))
}

#[post("/artists/create", data = "<form>")]
async fn create_artist(store: Store, form: Form<ArtistForm>) -> Submission {
    let (name, result) = match form.into_inner().validate() {
        Ok(artist) => (Some(artist.name.clone()), store.create_artist(artist).await),
        Err(errors) => (None, Err(errors.into())),
    };
    created(result, "Artist", name.as_deref(), uri!(create_artist_form))
}

//  Shows

#[get("/shows")]
async fn shows(store: Store) -> Result<Markup> {
    let shows = store.shows().await?;
    Ok(pages::shows(&shows))
}

#[get("/shows/create")]
fn create_show_form(flash: Option<FlashMessage<'_>>) -> Markup {
    let start_time = now().format("%Y-%m-%d %H:%M:%S").to_string();
    pages::show_form(&start_time, flash.map(Notice::from))
}

#[post("/shows/create", data = "<form>")]
async fn create_show(store: Store, form: Form<ShowForm>) -> Submission {
    let result = match form.into_inner().validate() {
        Ok(show) => store.create_show(show).await,
        Err(errors) => Err(errors.into()),
    };
    created(result, "Show", None, uri!(create_show_form))
}

//  Errors

#[catch(404)]
fn not_found() -> Markup {
    pages::not_found()
}

#[catch(500)]
fn server_error() -> Markup {
    pages::server_error()
}
