use maud::{html, Markup, DOCTYPE};
use rocket::request::FlashMessage;

use crate::form::{GENRES, STATES};
use crate::store::model::{Schedule, ShowAppearance};
use crate::store::{
    Area, Artist, ArtistDetail, ArtistListItem, ArtistSummary, Id, SearchResults, ShowListItem,
    Venue, VenueDetail, VenueSummary,
};

/// One-shot message shown on top of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    fn class(&self) -> &'static str {
        match self {
            Notice::Success(_) => "success",
            Notice::Error(_) => "error",
        }
    }

    fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }
}

impl From<FlashMessage<'_>> for Notice {
    fn from(flash: FlashMessage<'_>) -> Self {
        match flash.kind() {
            "success" => Notice::Success(flash.message().to_string()),
            _ => Notice::Error(flash.message().to_string()),
        }
    }
}

#[derive(PartialEq)]
enum Page {
    Home,
    Venues,
    Artists,
    Shows,
}

impl Page {
    fn url(&self) -> &'static str {
        use Page::*;

        match self {
            Home => "/",
            Venues => "/venues",
            Artists => "/artists",
            Shows => "/shows",
        }
    }

    fn title(&self) -> &'static str {
        use Page::*;

        match self {
            Home => "Home",
            Venues => "Venues",
            Artists => "Artists",
            Shows => "Shows",
        }
    }
}

fn base_html(main: Markup, current_page: &Page, notice: Option<&Notice>) -> Markup {
    use Page::*;
    html! {
        ( DOCTYPE )
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Fyyur" }

                link href="/static/main.css" rel="stylesheet";
            }
            body {
                header {
                    div.header {
                        a.title href="/" { h1 { "Fyyur" } }
                        nav {
                            ol {
                                @for page in vec![Home, Venues, Artists, Shows] {
                                    li { ( nav_entry(page, current_page) ) }
                                }
                            }
                        }
                    }
                }
                main {
                    @if let Some(notice) = notice {
                        div class=( format!("notice {}", notice.class()) ) { ( notice.message() ) }
                    }
                    ( main )
                }
            }
        }
    }
}

fn nav_entry(page: Page, current: &Page) -> Markup {
    html! {
        a.current[current == &page] href=( page.url() ) { ( page.title() ) }
    }
}

pub fn home(notice: Option<Notice>) -> Markup {
    base_html(
        html! {
            h2 { "Fyyur: find and book live music" }
            ul.actions {
                li { a href="/venues/create" { "Post a venue" } }
                li { a href="/artists/create" { "Post an artist" } }
                li { a href="/shows/create" { "Post a show" } }
            }
        },
        &Page::Home,
        notice.as_ref(),
    )
}

fn search_box(action: &str, term: &str) -> Markup {
    html! {
        form.search method="post" action=(action) {
            input type="search" name="search_term" value=(term) placeholder="Search by name";
            button type="submit" { "Search" }
        }
    }
}

pub fn venues(areas: &[Area]) -> Markup {
    base_html(
        html! {
            ( search_box("/venues/search", "") )
            @for area in areas {
                section.area {
                    h3 { ( area.city ) ", " ( area.state ) }
                    ( venue_summaries(&area.venues) )
                }
            }
        },
        &Page::Venues,
        None,
    )
}

fn venue_summaries(venues: &[VenueSummary]) -> Markup {
    html! {
        ul.venues {
            @for venue in venues {
                li {
                    a href=( format!("/venues/{}", venue.id) ) { ( venue.name ) }
                    span.count { ( format!(" ({} upcoming shows)", venue.num_upcoming_shows) ) }
                }
            }
        }
    }
}

fn artist_summaries(artists: &[ArtistSummary]) -> Markup {
    html! {
        ul.artists {
            @for artist in artists {
                li {
                    a href=( format!("/artists/{}", artist.id) ) { ( artist.name ) }
                    span.count { ( format!(" ({} upcoming shows)", artist.num_upcoming_shows) ) }
                }
            }
        }
    }
}

fn results_heading(count: usize, term: &str) -> Markup {
    html! {
        h3 { ( format!("Number of search results for \"{}\": {}", term, count) ) }
    }
}

pub fn search_venues(term: &str, results: &SearchResults<VenueSummary>) -> Markup {
    base_html(
        html! {
            ( search_box("/venues/search", term) )
            ( results_heading(results.count, term) )
            ( venue_summaries(&results.data) )
        },
        &Page::Venues,
        None,
    )
}

pub fn search_artists(term: &str, results: &SearchResults<ArtistSummary>) -> Markup {
    base_html(
        html! {
            ( search_box("/artists/search", term) )
            ( results_heading(results.count, term) )
            ( artist_summaries(&results.data) )
        },
        &Page::Artists,
        None,
    )
}

pub fn artists(artists: &[ArtistListItem]) -> Markup {
    base_html(
        html! {
            ( search_box("/artists/search", "") )
            ul.artists {
                @for artist in artists {
                    li { a href=( format!("/artists/{}", artist.id) ) { ( artist.name ) } }
                }
            }
        },
        &Page::Artists,
        None,
    )
}

fn optional(label: &str, value: &Option<String>) -> Markup {
    html! {
        @if let Some(value) = value {
            p { strong { ( label ) ": " } ( value ) }
        }
    }
}

fn link(label: &str, value: &Option<String>) -> Markup {
    html! {
        @if let Some(value) = value {
            p { a href=(value) { ( label ) } }
        }
    }
}

fn genre_tags(genres: &[String]) -> Markup {
    html! {
        ul.genres {
            @for genre in genres {
                li { ( genre ) }
            }
        }
    }
}

fn seeking(flag: bool, what: &str, description: &Option<String>) -> Markup {
    html! {
        @if flag {
            div.seeking {
                p { ( format!("Currently seeking {}", what) ) }
                @if let Some(description) = description {
                    p { ( description ) }
                }
            }
        } @else {
            p.not-seeking { ( format!("Not currently seeking {}", what) ) }
        }
    }
}

fn appearances(title: &str, count: usize, shows: &[ShowAppearance], counterpart: &str) -> Markup {
    html! {
        section.shows {
            h3 { ( format!("{} {}", count, title) ) }
            ol {
                @for show in shows {
                    li {
                        @if let Some(image) = &show.counterpart_image_link {
                            img src=(image) alt=(show.counterpart_name);
                        }
                        a href=( format!("/{}/{}", counterpart, show.counterpart_id) ) { ( show.counterpart_name ) }
                        span.time { " " ( show.start_time ) }
                    }
                }
            }
        }
    }
}

fn schedule(schedule: &Schedule, counterpart: &str) -> Markup {
    html! {
        ( appearances("Upcoming Shows", schedule.upcoming_shows_count, &schedule.upcoming_shows, counterpart) )
        ( appearances("Past Shows", schedule.past_shows_count, &schedule.past_shows, counterpart) )
    }
}

fn delete_button(action: &str) -> Markup {
    html! {
        form.delete method="post" action=(action) {
            input type="hidden" name="_method" value="delete";
            button type="submit" { "Delete" }
        }
    }
}

pub fn venue_detail(detail: &VenueDetail, notice: Option<Notice>) -> Markup {
    let venue = &detail.venue;
    base_html(
        html! {
            div.venue {
                h2 { ( venue.name ) }
                p.id { ( format!("ID: {}", detail.id) ) }
                ( genre_tags(&venue.genres) )
                p { ( venue.city ) ", " ( venue.state ) }
                ( optional("Address", &venue.address) )
                ( optional("Phone", &venue.phone) )
                ( link("Website", &venue.website) )
                ( link("Facebook", &venue.facebook_link) )
                ( seeking(venue.seeking_talent, "talent", &venue.seeking_description) )
                @if let Some(image) = &venue.image_link {
                    img.portrait src=(image) alt=(venue.name);
                }
                p { a href=( format!("/venues/{}/edit", detail.id) ) { "Edit" } }
                ( delete_button(&format!("/venues/{}", detail.id)) )
            }
            ( schedule(&detail.schedule, "artists") )
        },
        &Page::Venues,
        notice.as_ref(),
    )
}

pub fn artist_detail(detail: &ArtistDetail, notice: Option<Notice>) -> Markup {
    let artist = &detail.artist;
    base_html(
        html! {
            div.artist {
                h2 { ( artist.name ) }
                p.id { ( format!("ID: {}", detail.id) ) }
                ( genre_tags(&artist.genres) )
                p { ( artist.city ) ", " ( artist.state ) }
                ( optional("Phone", &artist.phone) )
                ( link("Website", &artist.website) )
                ( link("Facebook", &artist.facebook_link) )
                ( seeking(artist.seeking_venue, "performance venues", &artist.seeking_description) )
                @if let Some(image) = &artist.image_link {
                    img.portrait src=(image) alt=(artist.name);
                }
                p { a href=( format!("/artists/{}/edit", detail.id) ) { "Edit" } }
                ( delete_button(&format!("/artists/{}", detail.id)) )
            }
            ( schedule(&detail.schedule, "venues") )
        },
        &Page::Artists,
        notice.as_ref(),
    )
}

pub fn shows(shows: &[ShowListItem]) -> Markup {
    base_html(
        html! {
            ol.shows {
                @for show in shows {
                    li {
                        @if let Some(image) = &show.artist_image_link {
                            img src=(image) alt=(show.artist_name);
                        }
                        span.time { ( show.start_time ) " " }
                        a href=( format!("/artists/{}", show.artist_id) ) { ( show.artist_name ) }
                        " playing at "
                        a href=( format!("/venues/{}", show.venue_id) ) { ( show.venue_name ) }
                    }
                }
            }
        },
        &Page::Shows,
        None,
    )
}

// Forms

fn text_input(label: &str, name: &str, value: Option<&str>) -> Markup {
    html! {
        label {
            ( label )
            input type="text" name=(name) value=(value.unwrap_or(""));
        }
    }
}

fn state_select(selected: Option<&str>) -> Markup {
    html! {
        label {
            "State"
            select name="state" {
                @for state in STATES {
                    option value=(state) selected[selected == Some(*state)] { ( state ) }
                }
            }
        }
    }
}

fn genre_select(selected: &[String]) -> Markup {
    html! {
        label {
            "Genres"
            select name="genres" multiple {
                @for genre in GENRES {
                    option value=(genre) selected[selected.iter().any(|g| g == genre)] { ( genre ) }
                }
            }
        }
    }
}

fn checkbox(label: &str, name: &str, checked: bool) -> Markup {
    html! {
        label {
            input type="checkbox" name=(name) value="y" checked[checked];
            ( label )
        }
    }
}

/// Creation when `venue` is `None`, editing of venue `id` otherwise.
pub fn venue_form(venue: Option<(Id, &Venue)>, notice: Option<Notice>) -> Markup {
    let (action, heading) = match venue {
        Some((id, v)) => (format!("/venues/{}/edit", id), format!("Edit venue {}", v.name)),
        None => (String::from("/venues/create"), String::from("List a new venue")),
    };
    let v = venue.map(|(_, v)| v);

    base_html(
        html! {
            h2 { ( heading ) }
            form.venue method="post" action=(action) {
                ( text_input("Name", "name", v.map(|v| v.name.as_str())) )
                ( text_input("City", "city", v.map(|v| v.city.as_str())) )
                ( state_select(v.map(|v| v.state.as_str())) )
                ( text_input("Address", "address", v.and_then(|v| v.address.as_deref())) )
                ( text_input("Phone", "phone", v.and_then(|v| v.phone.as_deref())) )
                ( genre_select(v.map(|v| v.genres.as_slice()).unwrap_or(&[])) )
                ( text_input("Facebook link", "facebook_link", v.and_then(|v| v.facebook_link.as_deref())) )
                ( text_input("Image link", "image_link", v.and_then(|v| v.image_link.as_deref())) )
                ( text_input("Website", "website_link", v.and_then(|v| v.website.as_deref())) )
                ( checkbox("Seeking talent", "seeking_talent", v.map_or(false, |v| v.seeking_talent)) )
                ( text_input("Seeking description", "seeking_description", v.and_then(|v| v.seeking_description.as_deref())) )
                button type="submit" { "Save" }
            }
        },
        &Page::Venues,
        notice.as_ref(),
    )
}

/// Creation when `artist` is `None`, editing of artist `id` otherwise.
pub fn artist_form(artist: Option<(Id, &Artist)>, notice: Option<Notice>) -> Markup {
    let (action, heading) = match artist {
        Some((id, a)) => (format!("/artists/{}/edit", id), format!("Edit artist {}", a.name)),
        None => (String::from("/artists/create"), String::from("List a new artist")),
    };
    let a = artist.map(|(_, a)| a);

    base_html(
        html! {
            h2 { ( heading ) }
            form.artist method="post" action=(action) {
                ( text_input("Name", "name", a.map(|a| a.name.as_str())) )
                ( text_input("City", "city", a.map(|a| a.city.as_str())) )
                ( state_select(a.map(|a| a.state.as_str())) )
                ( text_input("Phone", "phone", a.and_then(|a| a.phone.as_deref())) )
                ( genre_select(a.map(|a| a.genres.as_slice()).unwrap_or(&[])) )
                ( text_input("Facebook link", "facebook_link", a.and_then(|a| a.facebook_link.as_deref())) )
                ( text_input("Image link", "image_link", a.and_then(|a| a.image_link.as_deref())) )
                ( text_input("Website", "website_link", a.and_then(|a| a.website.as_deref())) )
                ( checkbox("Seeking venue", "seeking_venue", a.map_or(false, |a| a.seeking_venue)) )
                ( text_input("Seeking description", "seeking_description", a.and_then(|a| a.seeking_description.as_deref())) )
                button type="submit" { "Save" }
            }
        },
        &Page::Artists,
        notice.as_ref(),
    )
}

pub fn show_form(default_start_time: &str, notice: Option<Notice>) -> Markup {
    base_html(
        html! {
            h2 { "List a new show" }
            form.show method="post" action="/shows/create" {
                ( text_input("Artist ID", "artist_id", None) )
                ( text_input("Venue ID", "venue_id", None) )
                ( text_input("Start time", "start_time", Some(default_start_time)) )
                button type="submit" { "Save" }
            }
        },
        &Page::Shows,
        notice.as_ref(),
    )
}

// Errors

pub fn not_found() -> Markup {
    base_html(
        html! {
            h2 { "404" }
            p { "Not found" }
        },
        &Page::Home,
        None,
    )
}

pub fn server_error() -> Markup {
    base_html(
        html! {
            h2 { "500" }
            p { "Something went wrong on our side." }
        },
        &Page::Home,
        None,
    )
}
