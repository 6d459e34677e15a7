use std::fs::OpenOptions;
use std::sync::Mutex;

use rocket::fairing::AdHoc;
use rocket::figment::Profile;
use rocket::Config;
use tracing::Level;

use crate::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log file: {0}")]
    File(#[from] std::io::Error),
    #[error("failed to init logger: {0}")]
    Init(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Installs the global subscriber: stdout in the debug profile, the
/// configured log file (INFO and up, with source locations) otherwise.
pub fn init(config: &AppConfig, profile: &Profile) -> Result<(), LoggingError> {
    if *profile == Config::DEBUG_PROFILE {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        let subscriber = tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_max_level(Level::INFO)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

pub fn fairing() -> AdHoc {
    AdHoc::try_on_ignite("Logging", |rocket| async move {
        let config = rocket.state::<AppConfig>().cloned().unwrap_or_default();

        match init(&config, rocket.figment().profile()) {
            Ok(()) => {
                tracing::info!(profile = %rocket.figment().profile(), "logging initialized");
                Ok(rocket)
            }
            // A subscriber from an earlier instance in this process stays in place.
            Err(LoggingError::Init(_)) => Ok(rocket),
            Err(e) => {
                eprintln!("{}", e);
                Err(rocket)
            }
        }
    })
}
