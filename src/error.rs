use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{url} answered with {status}")]
    Status {
        url:    String,
        status: reqwest::StatusCode,
    },

    #[error("Couldn't decode response from {url}: {source}")]
    Decode {
        url:    String,
        source: serde_path_to_error::Error<serde_json::Error>,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] figment::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
