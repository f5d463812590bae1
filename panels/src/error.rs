//! Error taxonomy for backend calls.
//!
//! ERROR HANDLING
//! ==============
//! Four classes reach the user: missing identity (redirect to login),
//! transport failure (retryable, generic copy), validation rejection (4xx,
//! server detail shown), and server fault (5xx, generic copy). Nothing is
//! retried automatically; every retry is a fresh user action.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

pub const MSG_MISSING_IDENTITY: &str = "Please log in to continue.";
pub const MSG_TRANSPORT: &str = "Cannot reach the server. Check your connection and try again.";
pub const MSG_SERVER: &str = "A server error occurred. Please try again later.";
pub const MSG_DECODE: &str = "The server sent an unexpected response.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No logged-in identity in storage.
    #[error("no logged-in user")]
    MissingIdentity,
    /// The request never produced an HTTP response.
    #[error("transport failure: {0}")]
    Transport(String),
    /// 4xx with an optional server-provided detail.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, detail: Option<String> },
    /// 5xx.
    #[error("server fault with status {status}")]
    Server { status: u16, detail: Option<String> },
    /// A success status whose body did not match the expected schema.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success response from its status and raw body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            0 => Self::Transport(detail.unwrap_or_else(|| "no response".to_owned())),
            500..=599 => Self::Server { status, detail },
            _ => Self::Rejected { status, detail },
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } | Self::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Text shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingIdentity => MSG_MISSING_IDENTITY.to_owned(),
            Self::Transport(_) => MSG_TRANSPORT.to_owned(),
            Self::Rejected { status, detail } => detail
                .clone()
                .unwrap_or_else(|| format!("The request was rejected (HTTP {status}).")),
            Self::Server { .. } => MSG_SERVER.to_owned(),
            Self::Decode(_) => MSG_DECODE.to_owned(),
        }
    }
}

/// Pull a FastAPI-style `detail` out of an error body.
///
/// `detail` is either a string or a list of validation records whose `msg`
/// fields are joined. A non-JSON body is used verbatim when non-empty.
#[must_use]
pub fn extract_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_owned());
    };
    match value.get("detail") {
        Some(Value::String(detail)) => Some(detail.clone()),
        Some(Value::Array(records)) => {
            let joined = records
                .iter()
                .filter_map(|record| record.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => value.get("message").and_then(Value::as_str).map(str::to_owned),
    }
}
