//! Error handling for mergeup.
//!
//! Every failure an upload attempt can run into maps onto one variant of
//! [`Error`]. The orchestrator catches them all and shows their `Display`
//! form to the user, so the messages below are user-facing text.

use std::io;
use thiserror::Error;

/// Errors that can happen while selecting, uploading or rendering.
#[derive(Error, Debug)]
pub enum Error {
    /// Nothing to upload, or a similar precondition failed before any network
    /// activity.
    #[error("{0}")]
    Validation(String),

    /// The transport failed before an HTTP response was obtained.
    #[error("Network error")]
    Network {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// The server answered with a non-success status.
    ///
    /// Carries the server's `detail` message, or `HTTP <code> <reason>` when
    /// the body has none.
    #[error("{0}")]
    Http(String),

    /// The response body could not be parsed as JSON. Holds the raw body.
    #[error("Invalid JSON: {0}")]
    InvalidResponse(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O error while reading a selected file.
    #[error("I/O error: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from an underlying system.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Network {
            source: reqwest_middleware::Error::Reqwest(source),
        }
    }
}

/// Result type alias for operations that can fail with a mergeup error.
pub type Result<T> = std::result::Result<T, Error>;
