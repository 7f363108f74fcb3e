//! Progress module containing the terminal progress bar styling.
//!
//! The upload percentage computed by the transport is drawn with an
//! [`indicatif`] bar built from [`ProgressBarOpts`].
//!
//! # Examples
//!
//! ```rust
//! use mergeup::progress::ProgressBarOpts;
//!
//! // A bar that is never drawn
//! let pb = ProgressBarOpts::hidden().to_progress_bar();
//! assert!(pb.is_hidden());
//! ```

pub(crate) mod style;

pub use style::ProgressBarOpts;
