//! Uploader module containing the upload orchestration, its builder, and
//! configuration.
//!
//! - `uploader` - the [`Uploader`] and its trigger action
//! - `builder` - [`UploaderBuilder`] for configuring an uploader
//! - `config` - [`UploaderConfig`], defaults, and endpoint helpers
//!
//! # Examples
//!
//! ```rust
//! use mergeup::uploader::UploaderBuilder;
//! use mergeup::view::TerminalView;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let uploader = UploaderBuilder::new()
//!     .chunk_size(16 * 1024)
//!     .build(Arc::new(TerminalView::default()))?;
//! assert_eq!(uploader.endpoint().path(), "/merge/from-upload");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod uploader;

pub use builder::UploaderBuilder;
pub use config::{merge_endpoint, UploaderConfig, DEFAULT_BASE_URL, DEFAULT_HIDE_DELAY};
pub use uploader::{Attempt, Uploader, NO_BATCH, NO_FILES_NOTICE};
