//! A [`MergeView`] drawing to the terminal.

use super::MergeView;
use crate::progress::ProgressBarOpts;
use crate::response::{LogOutput, Primary};
use crate::uploader::NO_BATCH;

use console::style;
use indicatif::ProgressBar;
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Terminal rendition of the merge UI.
///
/// The progress container maps to an [`indicatif`] bar that exists only while
/// visible. Everything else is written to stdout (or the writer given to
/// [`TerminalView::with_writer`]) as it changes, with the bar suspended
/// around each line.
pub struct TerminalView {
    opts: ProgressBarOpts,
    bar: Mutex<Option<ProgressBar>>,
    trigger_enabled: AtomicBool,
    out: Mutex<Box<dyn Write + Send>>,
}

impl fmt::Debug for TerminalView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalView")
            .field("opts", &self.opts)
            .field("progress_visible", &self.is_progress_visible())
            .field("trigger_enabled", &self.is_trigger_enabled())
            .finish()
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new(ProgressBarOpts::default())
    }
}

impl TerminalView {
    pub fn new(opts: ProgressBarOpts) -> Self {
        Self::with_writer(opts, io::stdout())
    }

    /// Creates a view printing its lines to `out` instead of stdout.
    pub fn with_writer<W: Write + Send + 'static>(opts: ProgressBarOpts, out: W) -> Self {
        Self {
            opts,
            bar: Mutex::new(None),
            trigger_enabled: AtomicBool::new(true),
            out: Mutex::new(Box::new(out)),
        }
    }

    /// Whether the upload trigger is currently enabled.
    pub fn is_trigger_enabled(&self) -> bool {
        self.trigger_enabled.load(Ordering::SeqCst)
    }

    /// Whether the progress bar is currently shown.
    pub fn is_progress_visible(&self) -> bool {
        self.bar.lock().map(|b| b.is_some()).unwrap_or(false)
    }

    fn line(&self, text: &str) {
        let write = || {
            let Ok(mut out) = self.out.lock() else { return };
            if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
                warn!("Failed to write to the terminal: {}", e);
            }
        };
        // `ProgressBar::println` drops the line when the bar is hidden.
        match self.bar.lock().ok().as_deref() {
            Some(Some(pb)) => pb.suspend(write),
            _ => write(),
        }
    }
}

impl MergeView for TerminalView {
    fn alert(&self, message: &str) {
        eprintln!("{} {}", style("!").yellow().bold(), style(message).yellow());
    }

    fn show_selection(&self, listing: Option<&str>) {
        if let Some(listing) = listing {
            self.line(&format!("{}\n{}", style("Selected:").bold(), listing));
        }
    }

    fn set_trigger_enabled(&self, enabled: bool) {
        debug!("Trigger enabled: {}", enabled);
        self.trigger_enabled.store(enabled, Ordering::SeqCst);
    }

    fn set_batch_label(&self, label: &str) {
        if label != NO_BATCH {
            self.line(&format!("{} {}", style("Batch:").bold(), label));
        }
    }

    fn set_keys(&self, keys: &[String]) {
        for key in keys {
            self.line(&format!("{} {}", style("Key:").bold(), style(key).dim()));
        }
    }

    fn show_log(&self, log: Option<&LogOutput>) {
        let Some(log) = log else { return };

        let primary = match &log.primary {
            Primary::Link { href, label } => {
                format!("{} {}", style(label).green().bold(), style(href).underlined())
            }
            Primary::Notice(text) => style(text).yellow().to_string(),
            Primary::Error(text) => style(text).red().to_string(),
        };
        self.line(&primary);

        if let Some(issues) = &log.issues {
            self.line(&style(issues).yellow().to_string());
        }
    }

    fn set_progress(&self, percent: u8) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.set_position(u64::from(percent));
            }
        }
    }

    fn set_progress_visible(&self, visible: bool) {
        let Ok(mut guard) = self.bar.lock() else { return };

        if visible {
            if guard.is_none() {
                *guard = Some(self.opts.clone().to_progress_bar());
            }
        } else if let Some(pb) = guard.take() {
            if self.opts.clear() {
                pb.finish_and_clear();
            } else {
                pb.finish();
            }
        }
    }
}
