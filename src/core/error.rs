use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Employee not found with id {0}")]
    NotFound(Uuid),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Too many requests against the directory")]
    RateLimited,

    #[error("Directory server error: {0}")]
    ServerError(String),

    #[error("Malformed directory response: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::ParseError(err.to_string());
        }
        match err.status() {
            Some(status) if status.as_u16() == 429 => Self::RateLimited,
            Some(status) if status.as_u16() == 400 => Self::BadRequest(err.to_string()),
            _ => Self::ServerError(err.to_string()),
        }
    }
}
