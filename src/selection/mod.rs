//! Selection module containing the file selection model and its listing.
//!
//! A [`FileSelection`] is the ordered set of local files the user picked.
//! It is replaced wholesale on every change and rendered into a short,
//! human-readable listing by the [`report`] functions.
//!
//! # Examples
//!
//! ```rust
//! use mergeup::selection::{render_listing, FileSelection, SelectedFile};
//!
//! let selection = FileSelection::new(vec![
//!     SelectedFile::from_bytes("a.pdf", vec![0; 1200]),
//!     SelectedFile::from_bytes("b.pdf", vec![0; 300]),
//! ]);
//! assert_eq!(
//!     render_listing(&selection).as_deref(),
//!     Some("• a.pdf (1.2 KB)\n• b.pdf (300 B)")
//! );
//! ```

pub mod file;
pub mod report;

pub use file::{FileSelection, FileSource, SelectedFile};
pub use report::{human_size, render_listing};
