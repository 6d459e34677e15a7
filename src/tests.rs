use std::path::PathBuf;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::{Client, LocalResponse};
use tempfile::TempDir;

use crate::schema::{artists, shows, venues};

struct TestApp {
    client: Client,
    db_path: PathBuf,
    _dir: TempDir,
}

fn app() -> TestApp {
    let dir = tempfile::tempdir().expect("temporary directory");
    let db_path = dir.path().join("fyyur.sqlite");
    let assets_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static");

    let figment = rocket::Config::figment()
        .merge(("databases.fyyur.url", db_path.display().to_string()))
        .merge(("databases.fyyur.pool_size", 2))
        .merge(("assets_dir", assets_dir.display().to_string()))
        .merge(("log_level", "off"));

    let client = Client::tracked(super::build(figment)).expect("valid rocket instance");
    TestApp {
        client,
        db_path,
        _dir: dir,
    }
}

impl TestApp {
    fn db(&self) -> SqliteConnection {
        SqliteConnection::establish(&self.db_path.display().to_string()).expect("test database")
    }

    fn venue_count(&self) -> i64 {
        venues::table.count().get_result(&mut self.db()).unwrap()
    }

    fn artist_count(&self) -> i64 {
        artists::table.count().get_result(&mut self.db()).unwrap()
    }

    fn show_count(&self) -> i64 {
        shows::table.count().get_result(&mut self.db()).unwrap()
    }

    /// Installs a trigger that aborts every `event` on `table`.
    fn read_only(&self, table: &str, event: &str) {
        let trigger = format!(
            "CREATE TRIGGER {table}_read_only BEFORE {event} ON {table} \
             BEGIN SELECT RAISE(ABORT, '{table} are read-only'); END;"
        );
        diesel::sql_query(trigger)
            .execute(&mut self.db())
            .unwrap();
    }

    fn post_form(&self, uri: &str, body: &str) -> LocalResponse<'_> {
        self.client
            .post(uri.to_string())
            .header(ContentType::Form)
            .body(body.to_string())
            .dispatch()
    }

    fn get_body(&self, uri: &str) -> (Status, String) {
        let response = self.client.get(uri.to_string()).dispatch();
        let status = response.status();
        (status, response.into_string().unwrap_or_default())
    }

    fn create_venue(&self, name: &str, city: &str, state: &str) -> String {
        let body = format!(
            "name={}&city={}&state={}&address=1+Main+St&phone=555-0100&genres=Jazz&genres=Folk",
            name, city, state
        );
        self.post_form("/venues/create", &body)
            .into_string()
            .unwrap_or_default()
    }

    fn create_artist(&self, name: &str) -> String {
        let body = format!(
            "name={}&city=San+Francisco&state=CA&phone=326-123-5000&seeking_venue=y",
            name
        );
        self.post_form("/artists/create", &body)
            .into_string()
            .unwrap_or_default()
    }

    fn create_show(&self, venue_id: i32, artist_id: i32, start_time: &str) -> String {
        let body = format!(
            "venue_id={}&artist_id={}&start_time={}",
            venue_id,
            artist_id,
            start_time.replace(' ', "+")
        );
        self.post_form("/shows/create", &body)
            .into_string()
            .unwrap_or_default()
    }
}

fn location(response: &LocalResponse<'_>) -> Option<String> {
    response.headers().get_one("Location").map(String::from)
}

#[test]
fn creating_a_valid_venue_persists_one_row() {
    let app = app();

    let response = app.post_form(
        "/venues/create",
        "name=The+Last+Stop&city=NYC&state=NY&address=1+Main+St&phone=555-0100",
    );

    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    assert!(body.contains("Venue The Last Stop was successfully listed!"));
    assert!(body.contains("notice success"));
    assert_eq!(app.venue_count(), 1);
}

#[test]
fn venue_name_contained_in_existing_name_is_rejected() {
    let app = app();
    app.create_venue("The+Musical+Hop", "San+Francisco", "CA");

    let response = app.post_form(
        "/venues/create",
        "name=Musical&city=NYC&state=NY&address=2+Main+St&phone=555-0101",
    );

    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response).as_deref(), Some("/venues/create"));
    assert_eq!(app.venue_count(), 1);

    let (_, form) = app.get_body("/venues/create");
    assert!(form.contains("Musical"));
    assert!(form.contains("already exists."));

    app.create_venue("%C3%89COLE+Hall", "Paris", "NY");
    assert_eq!(app.venue_count(), 2);

    let response = app.post_form(
        "/venues/create",
        "name=%C3%A9cole&city=NYC&state=NY&address=3+Main+St&phone=555-0102",
    );

    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(app.venue_count(), 2);
}

#[test]
fn artist_name_contained_in_existing_name_is_rejected() {
    let app = app();
    app.create_artist("Guns+N+Petals");

    let response = app.post_form(
        "/artists/create",
        "name=guns&city=NYC&state=NY&phone=555-0101",
    );

    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(app.artist_count(), 1);
}

#[test]
fn empty_venue_name_is_rejected_before_persistence() {
    let app = app();

    let response = app.post_form(
        "/venues/create",
        "name=&city=NYC&state=NY&address=1+Main+St&phone=555-0100",
    );

    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(app.venue_count(), 0);

    let (_, form) = app.get_body("/venues/create");
    assert!(form.contains("name: This field is required."));
}

#[test]
fn missing_venue_is_not_found() {
    let app = app();

    let (status, body) = app.get_body("/venues/999");

    assert_eq!(status, Status::NotFound);
    assert!(body.contains("Not found"));
    assert_eq!(app.get_body("/artists/999").0, Status::NotFound);
    assert_eq!(app.get_body("/venues/999/edit").0, Status::NotFound);
}

#[test]
fn created_show_keeps_its_values_and_is_listed_on_both_sides() {
    let app = app();
    app.create_venue("The+Musical+Hop", "San+Francisco", "CA");
    app.create_artist("Guns+N+Petals");
    app.create_artist("Matt+Quevedo");

    let body = app.create_show(1, 2, "2024-05-01T20:00:00");
    assert!(body.contains("Show was successfully listed!"));

    let (venue_id, artist_id, start_time): (i32, i32, NaiveDateTime) = shows::table
        .select((shows::venue_id, shows::artist_id, shows::start_time))
        .first(&mut app.db())
        .unwrap();
    assert_eq!((venue_id, artist_id), (1, 2));
    assert_eq!(start_time.to_string(), "2024-05-01 20:00:00");

    let (_, venue_page) = app.get_body("/venues/1");
    assert!(venue_page.contains("Matt Quevedo"));
    assert!(venue_page.contains("2024-05-01 20:00:00"));

    let (_, artist_page) = app.get_body("/artists/2");
    assert!(artist_page.contains("The Musical Hop"));

    let (_, list) = app.get_body("/shows");
    assert!(list.contains("Matt Quevedo"));
    assert!(list.contains("The Musical Hop"));
}

#[test]
fn show_for_missing_venue_is_not_persisted() {
    let app = app();
    app.create_artist("Guns+N+Petals");

    let body = app.create_show(7, 1, "2024-05-01 20:00:00");

    assert!(body.contains("Error Venue 7 does not exist with inserting show."));
    assert_eq!(app.show_count(), 0);
}

#[test]
fn invalid_show_form_redirects_back() {
    let app = app();

    let response = app.post_form("/shows/create", "venue_id=one&artist_id=&start_time=soon");

    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response).as_deref(), Some("/shows/create"));
    assert_eq!(app.show_count(), 0);
}

#[test]
fn detail_splits_past_and_upcoming_shows() {
    let app = app();
    app.create_venue("The+Musical+Hop", "San+Francisco", "CA");
    app.create_artist("Guns+N+Petals");
    app.create_show(1, 1, "2000-01-01 20:00:00");
    app.create_show(1, 1, "2001-01-01 20:00:00");
    app.create_show(1, 1, "2999-01-01 20:00:00");

    let (_, venue_page) = app.get_body("/venues/1");
    assert!(venue_page.contains("1 Upcoming Shows"));
    assert!(venue_page.contains("2 Past Shows"));

    let (_, artist_page) = app.get_body("/artists/1");
    assert!(artist_page.contains("1 Upcoming Shows"));
    assert!(artist_page.contains("2 Past Shows"));
}

#[test]
fn venue_search_counts_shows_by_venue() {
    let app = app();
    app.create_venue("The+Musical+Hop", "San+Francisco", "CA");
    app.create_venue("Park+Square+Live+Music", "San+Francisco", "CA");
    app.create_artist("Guns+N+Petals");
    app.create_artist("Matt+Quevedo");
    app.create_show(2, 1, "2999-01-01 20:00:00");

    let body = app
        .post_form("/venues/search", "search_term=MUSIC")
        .into_string()
        .unwrap();

    assert!(body.contains(": 2</h3>"));
    assert!(body.contains("The Musical Hop"));
    assert!(body.contains("Park Square Live Music"));
    let hop = body.find("(0 upcoming shows)").expect("count for venue 1");
    let park = body.find("(1 upcoming shows)").expect("count for venue 2");
    assert!(hop < park);
}

#[test]
fn artist_search_is_case_insensitive() {
    let app = app();
    app.create_artist("Guns+N+Petals");
    app.create_artist("Matt+Quevedo");

    let body = app
        .post_form("/artists/search", "search_term=pEtAl")
        .into_string()
        .unwrap();

    assert!(body.contains(": 1</h3>"));
    assert!(body.contains("Guns N Petals"));
    assert!(!body.contains("Matt Quevedo"));
}

#[test]
fn search_folds_non_ascii_case() {
    let app = app();
    app.create_venue("%C3%89COLE+Hall", "San+Francisco", "CA");
    app.create_venue("The+Musical+Hop", "San+Francisco", "CA");

    let body = app
        .post_form("/venues/search", "search_term=%C3%A9cole")
        .into_string()
        .unwrap();

    assert!(body.contains(": 1</h3>"));
    assert!(body.contains("ÉCOLE Hall"));
    assert!(!body.contains("The Musical Hop"));
}

#[test]
fn venues_are_grouped_by_area() {
    let app = app();
    app.create_venue("The+Musical+Hop", "San+Francisco", "CA");
    app.create_venue("The+Dueling+Pianos+Bar", "New+York", "NY");

    let (status, body) = app.get_body("/venues");

    assert_eq!(status, Status::Ok);
    assert!(body.contains("San Francisco, CA"));
    assert!(body.contains("New York, NY"));
}

#[test]
fn artist_update_redirects_to_detail() {
    let app = app();
    app.create_artist("Guns+N+Petals");

    let response = app.post_form(
        "/artists/1/edit",
        "name=Guns+N+Roses&city=Los+Angeles&state=CA&phone=326-123-5000&genres=Rock+n+Roll",
    );
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response).as_deref(), Some("/artists/1"));

    let (_, page) = app.get_body("/artists/1");
    assert!(page.contains("Artist Guns N Roses successfully updated!"));
    assert!(page.contains("Rock n Roll"));

    let name: String = artists::table
        .select(artists::name)
        .first(&mut app.db())
        .unwrap();
    assert_eq!(name, "Guns N Roses");
}

#[test]
fn venue_update_happens_on_post() {
    let app = app();
    app.create_venue("The+Musical+Hop", "San+Francisco", "CA");

    let (_, form) = app.get_body("/venues/1/edit");
    assert!(form.contains(r#"value="The Musical Hop""#));

    let response = app.post_form(
        "/venues/1/edit",
        "name=The+Musical+Stop&city=San+Francisco&state=CA&address=1015+Folsom+Street&phone=123-123-1234&seeking_talent=y",
    );
    assert_eq!(response.status(), Status::SeeOther);

    let (name, seeking): (String, bool) = venues::table
        .select((venues::name, venues::seeking_talent))
        .first(&mut app.db())
        .unwrap();
    assert_eq!(name, "The Musical Stop");
    assert!(seeking);
}

#[test]
fn invalid_update_changes_nothing() {
    let app = app();
    app.create_venue("The+Musical+Hop", "San+Francisco", "CA");

    let response = app.post_form("/venues/1/edit", "name=&city=San+Francisco&state=CA");

    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response).as_deref(), Some("/venues/1/edit"));
    let name: String = venues::table
        .select(venues::name)
        .first(&mut app.db())
        .unwrap();
    assert_eq!(name, "The Musical Hop");
}

#[test]
fn updating_a_missing_artist_is_not_found() {
    let app = app();

    let response = app.post_form(
        "/artists/42/edit",
        "name=Nobody&city=NYC&state=NY&phone=555-0100",
    );

    assert_eq!(response.status(), Status::NotFound);
}

#[test]
fn deleting_a_venue_removes_its_shows() {
    let app = app();
    app.create_venue("The+Musical+Hop", "San+Francisco", "CA");
    app.create_artist("Guns+N+Petals");
    app.create_show(1, 1, "2999-01-01 20:00:00");

    let response = app.client.delete("/venues/1").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(app.venue_count(), 0);
    assert_eq!(app.show_count(), 0);
    assert_eq!(app.artist_count(), 1);

    let again = app.client.delete("/venues/1").dispatch();
    assert_eq!(again.status(), Status::Ok);
}

#[test]
fn deleting_an_artist_removes_its_shows() {
    let app = app();
    app.create_venue("The+Musical+Hop", "San+Francisco", "CA");
    app.create_artist("Guns+N+Petals");
    app.create_show(1, 1, "2000-01-01 20:00:00");

    let response = app.post_form("/artists/1", "_method=delete");

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(app.artist_count(), 0);
    assert_eq!(app.show_count(), 0);
}

#[test]
fn artists_page_lists_every_artist() {
    let app = app();
    app.create_artist("Guns+N+Petals");
    app.create_artist("The+Wild+Sax+Band");

    let (_, body) = app.get_body("/artists");

    assert!(body.contains(r#"href="/artists/1""#));
    assert!(body.contains("The Wild Sax Band"));
}

#[test]
fn static_assets_are_served() {
    let app = app();

    let response = app.client.get("/static/main.css").dispatch();

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(app.get_body("/static/missing.css").0, Status::NotFound);
}

#[test]
fn failed_venue_insert_reports_and_rolls_back() {
    let app = app();
    app.read_only("venues", "INSERT");

    let response = app.post_form(
        "/venues/create",
        "name=The+Last+Stop&city=NYC&state=NY&address=1+Main+St&phone=555-0100",
    );

    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    assert!(body.contains("Error venues are read-only with inserting venue The Last Stop."));
    assert!(body.contains("notice error"));
    assert!(body.contains("find and book live music"));
    assert_eq!(app.venue_count(), 0);
}

#[test]
fn failed_artist_insert_reports_and_rolls_back() {
    let app = app();
    app.create_artist("Guns+N+Petals");
    app.read_only("artists", "INSERT");

    let body = app.create_artist("Matt+Quevedo");

    assert!(body.contains("Error artists are read-only with inserting artist Matt Quevedo."));
    assert_eq!(app.artist_count(), 1);
}

#[test]
fn failed_venue_update_reports_on_detail_page() {
    let app = app();
    app.create_venue("The+Musical+Hop", "San+Francisco", "CA");
    app.read_only("venues", "UPDATE");

    let response = app.post_form(
        "/venues/1/edit",
        "name=The+Musical+Stop&city=San+Francisco&state=CA&address=1+Main+St&phone=555-0100",
    );
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response).as_deref(), Some("/venues/1"));

    let (_, page) = app.get_body("/venues/1");
    assert!(page.contains("Error venues are read-only with editing venue The Musical Stop."));
    assert!(page.contains("The Musical Hop"));

    let name: String = venues::table
        .select(venues::name)
        .first(&mut app.db())
        .unwrap();
    assert_eq!(name, "The Musical Hop");
    assert_eq!(app.venue_count(), 1);
}
