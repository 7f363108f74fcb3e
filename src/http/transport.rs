//! Multipart upload with byte-level progress.
//!
//! Each file part is streamed in chunks. Every chunk handed to the
//! connection advances a shared byte counter and the new value is forwarded
//! over a channel, so progress reaches the caller's observer in order and on
//! the caller's task rather than on the connection task.
//!
//! ```rust,no_run
//! use mergeup::http::{create_http_client, HttpClientConfig, MultipartPayload, ProgressTransport};
//! use mergeup::selection::{FileSelection, SelectedFile};
//! use reqwest::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let transport = ProgressTransport::new(client, 64 * 1024);
//!
//! let selection = FileSelection::new(vec![SelectedFile::from_bytes("a.pdf", vec![0; 4096])]);
//! let payload = MultipartPayload::from_selection(&selection).await?;
//! let url = Url::parse("http://localhost:8000/merge/from-upload")?;
//!
//! let res = transport
//!     .upload(&url, payload, |loaded, total| println!("{loaded}/{total}"))
//!     .await?;
//! println!("{} {}", res.status, res.body);
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::selection::FileSelection;

use bytes::Bytes;
use futures::stream::{self, StreamExt};
use hyper::ext::ReasonPhrase;
use reqwest::{
    header::CONTENT_TYPE,
    multipart::{Form, Part},
    Body, StatusCode, Url,
};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::io;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Multipart field name every file is appended under.
pub const FIELD_NAME: &str = "files";
/// Content type assumed when the server omits the header.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
/// Default size of the chunks the file parts are streamed in.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Percentage of `loaded` over `total`, rounded, or 0 when `total` is 0.
pub fn percent(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let p = (loaded as f64 / total as f64 * 100.0).round();
    p.clamp(0.0, 100.0) as u8
}

/// One file part of a [`MultipartPayload`].
#[derive(Debug, Clone)]
pub struct PayloadPart {
    pub file_name: String,
    pub content_type: &'static str,
    pub content: Bytes,
}

/// The multipart body of a merge request, one part per selected file.
#[derive(Debug, Clone, Default)]
pub struct MultipartPayload {
    parts: Vec<PayloadPart>,
}

impl MultipartPayload {
    /// Reads every selected file, keeping the selection order.
    pub async fn from_selection(selection: &FileSelection) -> Result<Self> {
        let mut parts = Vec::with_capacity(selection.len());
        for file in selection.files() {
            parts.push(PayloadPart {
                file_name: file.name.clone(),
                content_type: file.content_type(),
                content: Bytes::from(file.read().await?),
            });
        }
        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[PayloadPart] {
        &self.parts
    }

    /// Number of content bytes across all parts.
    pub fn total_len(&self) -> u64 {
        self.parts.iter().map(|p| p.content.len() as u64).sum()
    }
}

/// What the transport got back from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    pub status: StatusCode,
    /// Reason phrase of the status, empty when unknown.
    pub status_text: String,
    pub content_type: String,
    pub body: String,
}

impl UploadResponse {
    /// Creates a response, defaulting the content type to JSON.
    pub fn new(status: StatusCode, content_type: Option<String>, body: String) -> Self {
        Self {
            status,
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            content_type: content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            body,
        }
    }

    /// Replaces the canonical reason with the phrase the server sent, if any.
    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        if let Some(reason) = reason.filter(|r| !r.is_empty()) {
            self.status_text = reason;
        }
        self
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Sends multipart payloads and reports upload progress.
#[derive(Clone)]
pub struct ProgressTransport {
    client: ClientWithMiddleware,
    chunk_size: usize,
}

impl fmt::Debug for ProgressTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTransport")
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}

impl ProgressTransport {
    /// Creates a transport over `client`, streaming parts in `chunk_size`
    /// byte chunks.
    pub fn new(client: ClientWithMiddleware, chunk_size: usize) -> Self {
        Self {
            client,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// POSTs `payload` to `url`.
    ///
    /// `on_progress(loaded, total)` runs on the calling task each time more of
    /// the body has been handed to the connection, as long as `total` is not
    /// zero. Any HTTP response is a success at this level, whatever its
    /// status; only a failure to obtain one is an error.
    pub async fn upload<F>(
        &self,
        url: &Url,
        payload: MultipartPayload,
        mut on_progress: F,
    ) -> Result<UploadResponse>
    where
        F: FnMut(u64, u64),
    {
        let total = payload.total_len();
        let (tx, mut rx) = mpsc::unbounded_channel::<u64>();
        let loaded = Arc::new(AtomicU64::new(0));

        debug!(
            "Uploading {} file(s), {} bytes, to {}",
            payload.parts.len(),
            total,
            url
        );

        let mut form = Form::new();
        for part in payload.parts {
            let content = part.content;
            let len = content.len();
            let step = self.chunk_size;
            let chunks = (0..len)
                .step_by(step)
                .map(move |start| content.slice(start..(start + step).min(len)));

            let loaded = loaded.clone();
            let tx = tx.clone();
            let counted = stream::iter(chunks).map(move |chunk| {
                let n = chunk.len() as u64;
                let now = loaded.fetch_add(n, Ordering::SeqCst) + n;
                // The receiver only goes away once the response is in.
                let _ = tx.send(now);
                Ok::<_, io::Error>(chunk)
            });

            let part = Part::stream_with_length(Body::wrap_stream(counted), len as u64)
                .file_name(part.file_name)
                .mime_str(part.content_type)?;
            form = form.part(FIELD_NAME, part);
        }
        drop(tx);

        let send = self.client.post(url.clone()).multipart(form).send();
        tokio::pin!(send);

        let res = loop {
            tokio::select! {
                biased;
                Some(now) = rx.recv() => {
                    if total > 0 {
                        on_progress(now, total);
                    }
                }
                res = &mut send => break res?,
            }
        };
        while let Ok(now) = rx.try_recv() {
            if total > 0 {
                on_progress(now, total);
            }
        }

        let status = res.status();
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        // Only present when the server sent a non-canonical phrase.
        let reason = res
            .extensions()
            .get::<ReasonPhrase>()
            .and_then(|r| std::str::from_utf8(r.as_bytes()).ok())
            .map(String::from);
        let body = res.text().await?;
        info!("Merge endpoint answered {}", status);

        Ok(UploadResponse::new(status, content_type, body).with_reason(reason))
    }
}
