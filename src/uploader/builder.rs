//! Builder pattern implementation for creating Uploader instances.
//!
//! # Examples
//!
//! ```rust
//! use mergeup::uploader::{merge_endpoint, UploaderBuilder};
//! use mergeup::view::TerminalView;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let uploader = UploaderBuilder::new()
//!     .endpoint(merge_endpoint("https://merge.example.com")?)
//!     .filename("handouts.pdf")
//!     .expires_in(3600)
//!     .hide_delay(Duration::from_millis(300))
//!     .build(Arc::new(TerminalView::default()))?;
//! # Ok(())
//! # }
//! ```

use super::{config::UploaderConfig, uploader::Uploader};
use crate::error::Result;
use crate::view::MergeView;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

/// A builder used to create an [`Uploader`].
#[derive(Default)]
pub struct UploaderBuilder {
    config: UploaderConfig,
}

impl UploaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        UploaderBuilder::default()
    }

    /// Sets the merge endpoint uploads are POSTed to.
    ///
    /// See [`merge_endpoint`](super::merge_endpoint) to derive it from a
    /// server base URL.
    pub fn endpoint(mut self, endpoint: Url) -> Self {
        self.config.endpoint = Some(endpoint);
        self
    }

    /// Sets how long the progress container stays up after an attempt.
    pub fn hide_delay(mut self, hide_delay: Duration) -> Self {
        self.config.hide_delay = hide_delay;
        self
    }

    /// Sets the chunk size file parts are streamed in.
    ///
    /// Smaller chunks give finer-grained progress.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// Asks the server to name the merged document `filename`.
    pub fn filename(mut self, filename: &str) -> Self {
        self.config.filename = Some(String::from(filename));
        self
    }

    /// Asks the server for a pre-signed URL valid for `seconds`.
    pub fn expires_in(mut self, seconds: u64) -> Self {
        self.config.expires_in = Some(seconds);
        self
    }

    /// Routes uploads through `proxy`.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be
    /// merged into a single one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header.
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use mergeup::uploader::UploaderBuilder;
    ///
    /// let auth = HeaderValue::from_static("Bearer token");
    /// let builder = UploaderBuilder::new().header(header::AUTHORIZATION, auth);
    /// ```
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// The configuration gathered so far.
    pub fn config(&self) -> &UploaderConfig {
        &self.config
    }

    /// Create the [`Uploader`] driving `view`.
    ///
    /// Fails when the HTTP client cannot be built or the endpoint is invalid.
    pub fn build(self, view: Arc<dyn MergeView>) -> Result<Uploader> {
        Uploader::new(self.config, view)
    }
}
