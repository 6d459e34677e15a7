use std::path::PathBuf;

use rocket::fairing::AdHoc;
use serde::Deserialize;

/// Application settings read from `Rocket.toml` and `ROCKET_*` variables,
/// next to Rocket's own keys.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub assets_dir: PathBuf,
    /// Where logs go outside the debug profile.
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            assets_dir: PathBuf::from("static"),
            log_file: PathBuf::from("error.log"),
        }
    }
}

pub fn fairing() -> AdHoc {
    AdHoc::try_on_ignite("App Config", |rocket| async move {
        let config = match rocket.figment().extract::<AppConfig>() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Invalid application config: {}", e);
                return Err(rocket);
            }
        };

        if config.assets_dir.exists() {
            Ok(rocket.manage(config))
        } else {
            eprintln!(
                "The assets directory '{}' does not exist.",
                config.assets_dir.display()
            );

            Err(rocket)
        }
    })
}
