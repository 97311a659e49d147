use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Bad numeric input at the form boundary. The message is shown to the
    /// user verbatim and the input is discarded.
    #[error("{0}")]
    Validation(String),

    /// A record with this id is already in the store.
    #[error("duplicate workout id: {0}")]
    DuplicateId(String),

    /// No record with this id.
    #[error("no workout with id: {0}")]
    NotFound(String),

    /// The position source could not produce a fix.
    #[error("geolocation unavailable: {0}")]
    Geolocation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
