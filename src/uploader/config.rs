//! Configuration structures and defaults for the uploader.

use crate::error::{Error, Result};
use crate::http::DEFAULT_CHUNK_SIZE;

use reqwest::{header::HeaderMap, Url};
use std::time::Duration;

/// Server the uploader talks to when no endpoint is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Path of the merge operation, relative to the server base URL.
pub const MERGE_PATH: [&str; 2] = ["merge", "from-upload"];
/// How long the progress container stays visible after an attempt ends.
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(600);

/// Builds the merge endpoint URL under `base`.
///
/// ```rust
/// use mergeup::uploader::merge_endpoint;
///
/// let url = merge_endpoint("https://merge.example.com/api/").unwrap();
/// assert_eq!(url.as_str(), "https://merge.example.com/api/merge/from-upload");
/// ```
pub fn merge_endpoint(base: &str) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", base, e)))?;

    url.path_segments_mut()
        .map_err(|_| Error::InvalidUrl(format!("The url \"{}\" cannot be a base", base)))?
        .pop_if_empty()
        .extend(MERGE_PATH);

    Ok(url)
}

/// Configuration structure for the uploader.
#[derive(Clone, Debug)]
pub struct UploaderConfig {
    /// Merge endpoint; `DEFAULT_BASE_URL` + `/merge/from-upload` when unset.
    pub endpoint: Option<Url>,
    /// Delay before hiding the progress container after an attempt.
    pub hide_delay: Duration,
    /// Size of the chunks file parts are streamed in.
    pub chunk_size: usize,
    /// Name the server gives the merged document.
    pub filename: Option<String>,
    /// Requested lifetime of the pre-signed URL, in seconds.
    pub expires_in: Option<u64>,
    /// Optional proxy configuration.
    pub proxy: Option<reqwest::Proxy>,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            hide_delay: DEFAULT_HIDE_DELAY,
            chunk_size: DEFAULT_CHUNK_SIZE,
            filename: None,
            expires_in: None,
            proxy: None,
            headers: None,
        }
    }
}

impl UploaderConfig {
    /// The endpoint uploads are POSTed to, query parameters included.
    pub fn request_url(&self) -> Result<Url> {
        let mut url = match &self.endpoint {
            Some(url) => url.clone(),
            None => merge_endpoint(DEFAULT_BASE_URL)?,
        };

        if self.filename.is_some() || self.expires_in.is_some() {
            let mut query = url.query_pairs_mut();
            if let Some(ref filename) = self.filename {
                query.append_pair("filename", filename);
            }
            if let Some(expires_in) = self.expires_in {
                query.append_pair("expires_in", &expires_in.to_string());
            }
        }

        Ok(url)
    }
}
