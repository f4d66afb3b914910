use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error as ThisError;

use crate::response::Message;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("could not connect to the server ({0}); check your network connection and that the tunnel is running")]
    Transport(String),

    #[error("{0}")]
    Timeout(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Generation(String),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// The caller should send the user back to the login flow.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Maps a non-success HTTP status and its optional message onto the error taxonomy.
    pub fn from_status(status: u16, message: Option<String>, fallback: &str) -> Self {
        let message = message.filter(|m| !m.trim().is_empty()).unwrap_or_else(|| fallback.to_owned());
        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::Server { status, message },
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return Self::Timeout("the server is taking too long to respond".into());
        }
        if e.is_decode() {
            return Self::Server {
                status: e.status().map(|s| s.as_u16()).unwrap_or(200),
                message: format!("malformed response: {}", e),
            };
        }
        let target = e.url().map(|u| u.to_string()).unwrap_or_else(|| "unknown address".into());
        Self::Transport(target)
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Error::Transport(_) => StatusCode::BAD_GATEWAY,
            Error::Server { status, .. } => StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Error::Generation(_) => StatusCode::BAD_GATEWAY,
            Error::Decode(_) => StatusCode::BAD_REQUEST,
            Error::Io(_) | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(Message::new(self.to_string()))
    }
}
