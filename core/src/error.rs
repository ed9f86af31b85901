//! Error types for the Jotform API client.
//!
//! # Design
//! Every failure falls into one of three kinds (see [`ErrorKind`]):
//! configuration problems caught before any I/O, transport-level failures,
//! and vendor failures signalled inside a successful HTTP exchange. The
//! variants carry enough detail to tell cases apart within a kind (a
//! timeout is an `Http`-kind failure, but callers can still ask
//! [`ApiError::is_timeout`]).

use std::time::Duration;

use thiserror::Error;

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required configuration or arguments are missing or invalid. No
    /// request was sent.
    Configuration,
    /// The HTTP exchange failed: non-2xx status, network error or timeout.
    Http,
    /// The HTTP exchange succeeded but the envelope reported a failure.
    Vendor,
}

/// Errors returned by the request builders, the envelope decoder and the
/// async client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No API key was configured.
    #[error("API Key is undefined")]
    MissingApiKey,

    /// A required argument such as a form id was empty.
    #[error("{0} is undefined")]
    MissingArgument(&'static str),

    /// Configuration values could not be used (bad base URL, bad env value).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The request payload could not be encoded.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request could not complete (connection refused, body unreadable).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The envelope's `responseCode` is outside the 2xx family.
    #[error("{message}")]
    Vendor { code: String, message: String },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::MissingApiKey
            | ApiError::MissingArgument(_)
            | ApiError::InvalidConfig(_)
            | ApiError::Serialization(_) => ErrorKind::Configuration,
            ApiError::Http { .. } | ApiError::Transport(_) | ApiError::Timeout(_) => {
                ErrorKind::Http
            }
            ApiError::Vendor { .. } => ErrorKind::Vendor,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout(_))
    }

    /// The human-readable message without the variant prefix.
    ///
    /// For vendor and HTTP failures this is the text the server sent.
    pub fn message(&self) -> String {
        match self {
            ApiError::Http { message, .. } | ApiError::Vendor { message, .. } => message.clone(),
            ApiError::InvalidConfig(msg)
            | ApiError::Serialization(msg)
            | ApiError::Transport(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status attached to the failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
