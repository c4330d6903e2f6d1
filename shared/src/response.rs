//! Backend error body
//!
//! Failed requests carry `{"detail": ...}` where `detail` is either a plain
//! string or a list of structured validation issues
//! (`[{"loc": [...], "msg": "...", "type": "..."}]`). Some endpoints send
//! `{"message": ...}` instead. [`error_message`] flattens all of them into
//! one user-facing sentence.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One structured validation issue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationIssue {
    #[serde(default)]
    pub loc: Vec<Value>,
    pub msg: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl ValidationIssue {
    /// Field name, skipping the `body`/`query` prefix
    pub fn field(&self) -> Option<String> {
        self.loc
            .iter()
            .filter(|segment| !matches!(segment.as_str(), Some("body" | "query" | "path")))
            .last()
            .map(|segment| match segment {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
    }
}

/// `detail` field variants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Validation(Vec<ValidationIssue>),
    Other(Value),
}

/// Error envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Normalized message, if the body carries one
    pub fn message(&self) -> Option<String> {
        let from_detail = match &self.detail {
            Some(ErrorDetail::Message(msg)) => Some(msg.trim().to_string()),
            Some(ErrorDetail::Validation(issues)) => {
                let joined = issues
                    .iter()
                    .map(|issue| match issue.field() {
                        Some(field) => format!("{field}: {}", issue.msg),
                        None => issue.msg.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                Some(joined)
            }
            Some(ErrorDetail::Other(Value::Object(map))) => map
                .get("msg")
                .or_else(|| map.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string),
            Some(ErrorDetail::Other(_)) | None => None,
        };
        from_detail
            .filter(|m| !m.is_empty())
            .or_else(|| self.message.clone().filter(|m| !m.trim().is_empty()))
    }
}

/// Turn a raw error response body into a display message
///
/// Fallback chain: `detail` string → joined validation `msg`s → `message`
/// field → non-JSON body text → HTTP status reason.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body)
        && let Some(message) = parsed.message()
    {
        return message;
    }
    let text = body.trim();
    if !text.is_empty() && !text.starts_with('{') && !text.starts_with('[') {
        return text.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}
