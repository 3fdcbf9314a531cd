use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum RiffleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid mount target: {0:?}")]
    InvalidMountTarget(String),

    #[error("Application is already mounted")]
    AlreadyMounted,

    #[error("No route matches path: {0}")]
    RouteNotFound(String),

    #[error("Theme error: {0}")]
    Theme(String),

    #[error("OPML error: {0}")]
    Opml(String),
}

impl RiffleError {
    /// True when the request was aborted by the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RiffleError::Http(e) if e.is_timeout())
    }

    /// HTTP status of a rejected response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RiffleError::Status { status, .. } => Some(*status),
            RiffleError::Http(e) => e.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RiffleError>;
