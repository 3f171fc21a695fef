//! Error handling for the MediNear client

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use medinear_geolocation::LocationError;
use medinear_session::SessionError;

/// Field-level validation error reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub param: String,
    pub msg: String,
}

/// Unified error type for the MediNear client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The server answered with a non-success status
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
        errors: Vec<FieldError>,
    },

    /// The server rejected the session; it has already been cleared
    #[error("Not authorized, please log in again")]
    Unauthorized,

    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// Session persistence errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Location acquisition errors
    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// HTTP status carried by the error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Unauthorized => Some(401),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Field-level errors, empty unless the server sent some
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Error::Api { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Single-line message for a banner: the server's message when it sent
    /// one, the fallback otherwise
    pub fn banner(&self, fallback: &str) -> String {
        match self {
            Error::Api {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            Error::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// What a form shows after a failed submission
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    /// Rejected before submission, no request was made
    #[error("{0}")]
    Validation(String),

    /// Per-input messages from the server
    #[error("{}", .0.iter().map(|e| e.msg.as_str()).collect::<Vec<_>>().join(", "))]
    Fields(Vec<FieldError>),

    /// One banner message
    #[error("{0}")]
    Message(String),
}

impl FormError {
    /// Classify a failed submission; `fallback` is shown when the server
    /// gave no message
    pub fn from_error(err: Error, fallback: &str) -> Self {
        match err {
            Error::Validation(message) => FormError::Validation(message),
            Error::Api { ref errors, .. } if !errors.is_empty() => {
                FormError::Fields(errors.clone())
            }
            other => FormError::Message(other.banner(fallback)),
        }
    }

    /// Message for the input named `param`
    pub fn field(&self, param: &str) -> Option<&str> {
        match self {
            FormError::Fields(errors) => errors
                .iter()
                .find(|e| e.param == param)
                .map(|e| e.msg.as_str()),
            _ => None,
        }
    }

    /// Top-level message, absent when the errors are per field
    pub fn banner(&self) -> Option<&str> {
        match self {
            FormError::Validation(message) | FormError::Message(message) => Some(message),
            FormError::Fields(_) => None,
        }
    }
}
