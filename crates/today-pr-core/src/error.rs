//! Error types for today-pr-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("GitHub API error ({status}) for {path}: {message}")]
    Api {
        status: String,
        path: String,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed ref: {0}")]
    MalformedRef(String),

    #[error("Malformed repository name: {0}. Expected 'owner/repo'")]
    MalformedRepoName(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
