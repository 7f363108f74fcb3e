//! Turns an upload response into what the log area shows.

use super::envelope::ServerResponse;
use crate::error::{Error, Result};
use crate::http::UploadResponse;

/// Label of the download link for a merged document.
pub const LINK_LABEL: &str = "Merged PDF (pre-signed) → download";
/// Notice shown when a successful response carries no URL.
pub const NO_URL_NOTICE: &str = "Unexpected response: no URL returned.";

/// The main line of the log area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    /// A link opening the merged document in a new context.
    Link { href: String, label: String },
    /// A plain informational notice.
    Notice(String),
    /// A failure, already formatted as `Error: <message>`.
    Error(String),
}

/// Everything written to the log area after an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOutput {
    pub primary: Primary,
    /// Preformatted `Issues:` block, present when the server reported any.
    pub issues: Option<String>,
}

impl LogOutput {
    /// Log output for a caught error.
    pub fn error(err: &Error) -> Self {
        Self {
            primary: Primary::Error(format!("Error: {}", err)),
            issues: None,
        }
    }

    /// Whether the attempt ended in an error.
    pub fn is_error(&self) -> bool {
        matches!(self.primary, Primary::Error(_))
    }

    /// Plain-text form of the log area.
    pub fn to_text(&self) -> String {
        let primary = match &self.primary {
            Primary::Link { href, label } => format!("{}: {}", label, href),
            Primary::Notice(text) | Primary::Error(text) => text.clone(),
        };
        match &self.issues {
            Some(issues) => format!("{}\n{}", primary, issues),
            None => primary,
        }
    }
}

/// A successfully interpreted response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub log: LogOutput,
    pub response: ServerResponse,
}

/// Interprets an HTTP response from the merge endpoint.
///
/// A body that is not JSON and a non-success status are both errors; the
/// caller is expected to show them with [`LogOutput::error`].
pub fn render_response(res: &UploadResponse) -> Result<Rendered> {
    let response = ServerResponse::parse(&res.body)?;

    if !res.is_success() {
        let message = response.detail.clone().unwrap_or_else(|| {
            format!("HTTP {} {}", res.status.as_u16(), res.status_text)
                .trim_end()
                .to_string()
        });
        return Err(Error::Http(message));
    }

    let primary = match &response.url {
        Some(url) => Primary::Link {
            href: url.clone(),
            label: LINK_LABEL.to_string(),
        },
        None => Primary::Notice(NO_URL_NOTICE.to_string()),
    };

    let issues = match response.issues() {
        [] => None,
        issues => {
            let lines = issues.iter().map(|i| i.line()).collect::<Vec<_>>();
            Some(format!("Issues:\n{}", lines.join("\n")))
        }
    };

    Ok(Rendered {
        log: LogOutput { primary, issues },
        response,
    })
}
