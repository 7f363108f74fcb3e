//! The UI surface an [`Uploader`](crate::Uploader) drives.
//!
//! The uploader never owns UI elements. It is handed a [`MergeView`] once at
//! construction and only reads and writes state through it, which lets the
//! same orchestration run against a terminal, a GUI shell, or a test fake.

pub mod terminal;

pub use terminal::TerminalView;

use crate::response::LogOutput;

/// Operations on the elements of the merge UI.
///
/// Implementations are called from the task running the upload and must not
/// block for long; progress updates in particular arrive once per streamed
/// chunk.
pub trait MergeView: Send + Sync {
    /// Shows a notice the user has to acknowledge.
    fn alert(&self, message: &str);

    /// Shows the listing of selected files as a preformatted block, or clears
    /// it when `None`.
    fn show_selection(&self, listing: Option<&str>);

    /// Enables or disables the upload trigger.
    fn set_trigger_enabled(&self, enabled: bool);

    /// Sets the batch label text.
    fn set_batch_label(&self, label: &str);

    /// Replaces the keys list.
    fn set_keys(&self, keys: &[String]);

    /// Replaces the log area content, or clears it when `None`.
    fn show_log(&self, log: Option<&LogOutput>);

    /// Sets the progress bar value and the percentage text.
    fn set_progress(&self, percent: u8);

    /// Shows or hides the progress container.
    fn set_progress_visible(&self, visible: bool);
}
