//! Response module: decoding and rendering of merge endpoint responses.
//!
//! - [`envelope`] - the tolerant [`ServerResponse`] decoder
//! - [`render`] - interpretation of status and body into a [`LogOutput`]
//!
//! # Examples
//!
//! ```rust
//! use mergeup::http::UploadResponse;
//! use mergeup::response::{render_response, LogOutput};
//! use reqwest::StatusCode;
//!
//! let res = UploadResponse::new(
//!     StatusCode::INTERNAL_SERVER_ERROR,
//!     None,
//!     r#"{"detail":"merge failed"}"#.to_string(),
//! );
//! let err = render_response(&res).unwrap_err();
//! assert_eq!(LogOutput::error(&err).to_text(), "Error: merge failed");
//! ```

pub mod envelope;
pub mod render;

pub use envelope::{Issue, ServerResponse};
pub use render::{render_response, LogOutput, Primary, Rendered, LINK_LABEL, NO_URL_NOTICE};
