//! HTTP module: client construction and the progress-reporting transport.
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`transport`] - multipart uploads with byte-level progress
//!
//! # Examples
//!
//! ```rust
//! use mergeup::http::percent;
//!
//! assert_eq!(percent(50, 200), 25);
//! assert_eq!(percent(200, 200), 100);
//! assert_eq!(percent(10, 0), 0);
//! ```

pub mod client;
pub mod transport;

pub use client::{create_http_client, HttpClientConfig};
pub use transport::{
    percent, MultipartPayload, PayloadPart, ProgressTransport, UploadResponse,
    DEFAULT_CHUNK_SIZE, DEFAULT_CONTENT_TYPE, FIELD_NAME,
};
