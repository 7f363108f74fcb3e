//! The JSON envelope returned by the merge endpoint.
//!
//! Every field is optional and decoded leniently: a field that is missing,
//! empty, or of an unexpected JSON type is simply `None`. Only a body that is
//! not JSON at all is an error.

use crate::error::{Error, Result};

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Parsed body of a merge response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub ok: Option<bool>,
    /// Pre-signed download location of the merged PDF.
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub batch_id: Option<String>,
    /// Storage key of the merged output.
    #[serde(default, deserialize_with = "lenient_text")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_pages: Option<u64>,
    /// Per-file problems that did not abort the merge.
    #[serde(default, deserialize_with = "lenient_issues")]
    pub errors: Option<Vec<Issue>>,
    /// Error message accompanying a failure status.
    #[serde(default, deserialize_with = "lenient_text")]
    pub detail: Option<String>,
}

/// One entry of the `errors` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Issue {
    #[serde(default, deserialize_with = "lenient_text")]
    pub file: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reason: Option<String>,
}

impl Issue {
    /// Renders `- <file> → <reason>`, with `file` / `error` placeholders.
    pub fn line(&self) -> String {
        format!(
            "- {} → {}",
            self.file.as_deref().unwrap_or("file"),
            self.reason.as_deref().unwrap_or("error")
        )
    }
}

impl ServerResponse {
    /// Parses a response body.
    ///
    /// Fails with [`Error::InvalidResponse`] carrying the raw body when it is
    /// not JSON. A JSON value that is not an object yields an empty response.
    pub fn parse(body: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(body).map_err(|_| Error::InvalidResponse(body.to_string()))?;
        if !value.is_object() {
            return Ok(Self::default());
        }
        Ok(Self::deserialize(value).unwrap_or_default())
    }

    /// Issues reported by the server, empty when there are none.
    pub fn issues(&self) -> &[Issue] {
        self.errors.as_deref().unwrap_or_default()
    }
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = lenient(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn lenient_issues<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<Issue>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .map(|item| Issue::deserialize(item).unwrap_or_default())
                .collect(),
        )),
        _ => Ok(None),
    }
}
