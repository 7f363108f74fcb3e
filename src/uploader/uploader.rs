//! Core uploader implementation.
//!
//! [`Uploader::submit`] is the trigger action: it validates the selection,
//! streams the files to the merge endpoint while feeding the progress bar,
//! and writes the outcome to the log area. Errors never escape it; they end
//! up as `Error: <message>` in the log.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mergeup::selection::FileSelection;
//! use mergeup::uploader::{Attempt, UploaderBuilder};
//! use mergeup::view::TerminalView;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut uploader = UploaderBuilder::new().build(Arc::new(TerminalView::default()))?;
//! uploader.select(FileSelection::from_paths(&["a.pdf", "b.png"])?);
//!
//! if let Attempt::Completed(log) = uploader.submit().await {
//!     println!("{}", log.to_text());
//! }
//! # Ok(())
//! # }
//! ```

use super::config::UploaderConfig;
use crate::error::{Error, Result};
use crate::http::{create_http_client, percent, HttpClientConfig, MultipartPayload, ProgressTransport};
use crate::response::{render_response, LogOutput, Rendered};
use crate::selection::{render_listing, FileSelection};
use crate::view::MergeView;

use reqwest::Url;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Notice shown when the trigger is used with nothing selected.
pub const NO_FILES_NOTICE: &str = "Please select at least one file.";
/// Batch label shown while no batch is known.
pub const NO_BATCH: &str = "-";

/// How a [`Uploader::submit`] call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    /// Nothing was selected; the user got a notice and nothing was sent.
    Rejected(String),
    /// Another upload from this uploader is still running.
    Busy,
    /// The upload ran; holds what was written to the log area.
    Completed(LogOutput),
}

/// Uploads selections to the merge endpoint and reports through a view.
pub struct Uploader {
    config: UploaderConfig,
    endpoint: Url,
    transport: ProgressTransport,
    view: Arc<dyn MergeView>,
    selection: FileSelection,
    busy: Arc<AtomicBool>,
    attempts: Arc<AtomicU64>,
}

impl fmt::Debug for Uploader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uploader")
            .field("config", &self.config)
            .field("endpoint", &self.endpoint.as_str())
            .field("selection", &self.selection.len())
            .field("busy", &self.is_busy())
            .finish()
    }
}

impl Uploader {
    /// Creates a new Uploader with the given configuration.
    pub(crate) fn new(config: UploaderConfig, view: Arc<dyn MergeView>) -> Result<Self> {
        let client = create_http_client(HttpClientConfig {
            proxy: config.proxy.clone(),
            headers: config.headers.clone(),
        })
        .map_err(|e| Error::Internal(format!("Failed to build the HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.request_url()?,
            transport: ProgressTransport::new(client, config.chunk_size),
            config,
            view,
            selection: FileSelection::default(),
            busy: Arc::new(AtomicBool::new(false)),
            attempts: Arc::new(AtomicU64::new(0)),
        })
    }

    /// The URL uploads are POSTed to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn config(&self) -> &UploaderConfig {
        &self.config
    }

    /// The current selection.
    pub fn selection(&self) -> &FileSelection {
        &self.selection
    }

    /// Whether an upload is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Replaces the selection and refreshes the listing.
    pub fn select(&mut self, selection: FileSelection) {
        debug!("{} file(s) selected", selection.len());
        self.view.show_selection(render_listing(&selection).as_deref());
        self.selection = selection;
    }

    /// Runs one upload attempt for the current selection.
    ///
    /// The trigger is disabled for the duration of the attempt and re-enabled
    /// on every exit path, including this future being dropped; the progress
    /// container is hidden after the configured delay.
    pub async fn submit(&self) -> Attempt {
        if self.selection.is_empty() {
            let notice = Error::Validation(NO_FILES_NOTICE.to_string()).to_string();
            self.view.alert(&notice);
            return Attempt::Rejected(notice);
        }
        if self.busy.swap(true, Ordering::SeqCst) {
            debug!("Upload already in flight, ignoring trigger");
            return Attempt::Busy;
        }

        let _idle = IdleGuard::new(self);

        self.view.set_trigger_enabled(false);
        self.view.show_log(None);
        self.view.set_batch_label(NO_BATCH);
        self.view.set_keys(&[]);
        self.view.set_progress_visible(true);
        self.view.set_progress(0);

        let log = match self.run().await {
            Ok(rendered) => {
                if let Some(ref batch_id) = rendered.response.batch_id {
                    self.view.set_batch_label(batch_id);
                }
                if let Some(ref key) = rendered.response.key {
                    self.view.set_keys(std::slice::from_ref(key));
                }
                rendered.log
            }
            Err(e) => {
                warn!("Upload to {} failed: {:?}", self.endpoint, e);
                LogOutput::error(&e)
            }
        };

        self.view.show_log(Some(&log));
        Attempt::Completed(log)
    }

    async fn run(&self) -> Result<Rendered> {
        let payload = MultipartPayload::from_selection(&self.selection).await?;

        let view = &self.view;
        let res = self
            .transport
            .upload(&self.endpoint, payload, |loaded, total| {
                view.set_progress(percent(loaded, total));
            })
            .await?;

        render_response(&res)
    }
}

/// Restores the idle UI state when an attempt ends.
struct IdleGuard {
    view: Arc<dyn MergeView>,
    busy: Arc<AtomicBool>,
    attempts: Arc<AtomicU64>,
    attempt: u64,
    hide_delay: Duration,
}

impl IdleGuard {
    fn new(uploader: &Uploader) -> Self {
        let attempt = uploader.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        Self {
            view: uploader.view.clone(),
            busy: uploader.busy.clone(),
            attempts: uploader.attempts.clone(),
            attempt,
            hide_delay: uploader.config.hide_delay,
        }
    }
}

impl Drop for IdleGuard {
    fn drop(&mut self) {
        self.view.set_trigger_enabled(true);
        self.busy.store(false, Ordering::SeqCst);

        let view = self.view.clone();
        let attempts = self.attempts.clone();
        let attempt = self.attempt;
        let delay = self.hide_delay;

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    // A newer attempt owns the progress container now.
                    if attempts.load(Ordering::SeqCst) == attempt {
                        view.set_progress_visible(false);
                    }
                });
            }
            Err(_) => view.set_progress_visible(false),
        }
    }
}
