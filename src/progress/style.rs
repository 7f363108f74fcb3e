//! Progress bar styling for terminal surfaces.
//!
//! # Examples
//!
//! ```rust
//! use mergeup::progress::ProgressBarOpts;
//!
//! let opts = ProgressBarOpts::new(
//!     Some(ProgressBarOpts::TEMPLATE_PERCENT.to_string()),
//!     Some(ProgressBarOpts::CHARS_LINE.to_string()),
//!     true,
//!     true,
//! );
//! let pb = opts.to_progress_bar();
//! assert_eq!(pb.length(), Some(100));
//! ```

use indicatif::{ProgressBar, ProgressStyle};

/// Define the options for the upload progress bar.
///
/// The bar always counts percent, from 0 to 100.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// Progress bar template string.
    template: Option<String>,
    /// Progression characters set.
    ///
    /// There must be at least 3 characters for the following states:
    /// "filled", "current", and "to do".
    progress_chars: Option<String>,
    /// Enable or disable the progress bar.
    pub(crate) enabled: bool,
    /// Clear the progress bar once hidden.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_PERCENT.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_FINE.into()),
            enabled: true,
            clear: true,
        }
    }
}

impl ProgressBarOpts {
    /// Length of the bar: one step per percent.
    pub const LEN: u64 = 100;
    /// Template showing the bar and the percentage.
    ///
    /// `████████████████████▌                    52%`
    pub const TEMPLATE_PERCENT: &'static str = "{bar:40.blue} {pos:>3}%";
    /// Template with a spinner, the percentage and the elapsed time.
    pub const TEMPLATE_SPINNER: &'static str =
        "{spinner:.green} {bar:40.green/black} {pos:>3}% {elapsed:.blue}";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// Use a line as progress characters: `"━╾─"`.
    pub const CHARS_LINE: &'static str = "━╾╴─";

    /// Create a new [`ProgressBarOpts`].
    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    ///
    /// An invalid template falls back to the default bar.
    pub fn to_progress_style(self) -> ProgressStyle {
        let mut style = match self.template {
            Some(template) => {
                ProgressStyle::with_template(&template).unwrap_or_else(|_| ProgressStyle::default_bar())
            }
            None => ProgressStyle::default_bar(),
        };
        if let Some(progress_chars) = self.progress_chars {
            style = style.progress_chars(&progress_chars);
        }
        style
    }

    /// Create a [`ProgressBar`] based on the provided options.
    pub fn to_progress_bar(self) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let style = self.to_progress_style();
        ProgressBar::new(Self::LEN).with_style(style)
    }

    /// Set to `true` to clear the progress bar once hidden.
    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Create a new [`ProgressBarOpts`] which hides the progress bar.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn clear(&self) -> bool {
        self.clear
    }
}
