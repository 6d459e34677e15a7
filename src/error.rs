use std::result;

use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::Request;
use tracing::error;

use crate::form::FormErrors;
use crate::store::Id;

pub type Result<T> = result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] FormErrors),
    #[error("{kind} '{name}' already exists.")]
    Duplicate { kind: &'static str, name: String },
    #[error("{kind} {id} does not exist")]
    MissingReference { kind: &'static str, id: Id },
    #[error("record not found")]
    NotFound,
    #[error("{0}")]
    Persistence(diesel::result::Error),
}

impl From<diesel::result::Error> for Error {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::NotFound => Error::NotFound,
            other => Error::Persistence(other),
        }
    }
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        match self {
            Error::NotFound => Err(Status::NotFound),
            other => {
                error!(uri = %request.uri(), "request failed: {}", other);
                Err(Status::InternalServerError)
            }
        }
    }
}
