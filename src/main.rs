mod config;
mod error;
mod form;
mod logging;
mod schema;
mod store;
mod website;

#[cfg(test)]
mod tests;

#[macro_use]
extern crate rocket;
#[macro_use]
extern crate diesel;

use std::path::PathBuf;

use rocket::figment::Provider;
use rocket::fs::NamedFile;
use rocket::{Build, Rocket, State};

use config::AppConfig;
use store::Store;

#[launch]
fn rocket() -> _ {
    build(rocket::Config::figment())
}

/// Assembles the application from a configuration source. The database pool
/// is created and migrated at ignition and dropped at shutdown.
pub fn build<T: Provider>(provider: T) -> Rocket<Build> {
    let rocket = rocket::custom(provider)
        .attach(config::fairing())
        .attach(logging::fairing())
        .attach(Store::fairing())
        .mount("/", routes![static_file]);
    website::mount(rocket, "/")
}

#[get("/static/<file..>")]
async fn static_file(file: PathBuf, config: &State<AppConfig>) -> Option<NamedFile> {
    let path = config.assets_dir.join(file);
    NamedFile::open(path).await.ok()
}
