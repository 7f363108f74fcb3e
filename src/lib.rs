//! mergeup uploads local files to a PDF merge endpoint, reports upload
//! progress, and renders the download link or the errors that came back.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mergeup::{Attempt, FileSelection, TerminalView, UploaderBuilder};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), mergeup::Error> {
//! let mut uploader = UploaderBuilder::new().build(Arc::new(TerminalView::default()))?;
//! uploader.select(FileSelection::from_paths(&["cover.pdf", "scan.png"])?);
//!
//! if let Attempt::Completed(log) = uploader.submit().await {
//!     println!("{}", log.to_text());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`selection`] - Selected files and their human-readable listing
//! - [`uploader`] - The `Uploader` orchestrating one upload attempt, and its builder
//! - [`http`] - HTTP client setup and the progress-reporting transport
//! - [`response`] - Decoding and rendering of merge endpoint responses
//! - [`view`] - The UI surface trait and a terminal implementation
//! - [`progress`] - Progress bar styling
//! - [`error`] - Centralized error handling with the `Error` enum

pub mod error;
pub mod http;
pub mod progress;
pub mod response;
pub mod selection;
pub mod uploader;
pub mod view;

pub use error::{Error, Result};
pub use http::{create_http_client, percent, HttpClientConfig, ProgressTransport, UploadResponse};
pub use progress::ProgressBarOpts;
pub use response::{render_response, Issue, LogOutput, Primary, ServerResponse};
pub use selection::{human_size, render_listing, FileSelection, SelectedFile};
pub use uploader::{Attempt, Uploader, UploaderBuilder};
pub use view::{MergeView, TerminalView};
