//! Normalized error shape for every backend call.
//!
//! ERROR HANDLING
//! ==============
//! Service calls return `ApiError`; components catch at the call site and
//! render `to_string()` inline. There is no central error boundary.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure categories surfaced to the UI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No response was received (offline, DNS, CORS, aborted).
    #[error("Network error. Check your connection and try again.")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// 2xx response whose body did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    /// Token refresh was impossible; stored tokens were cleared.
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,
    /// Called outside the browser (server-side render pass).
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Build an API error from a status code and raw response body.
    ///
    /// The body's `message` (or `error`) field wins; otherwise a generic
    /// message for the status class is used.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = server_message(body).unwrap_or_else(|| fallback_message(status));
        Self::Api { status, message }
    }

    /// HTTP status when the server responded at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_owned)
}

/// Generic user-facing message for a status code.
#[must_use]
pub fn fallback_message(status: u16) -> String {
    match status {
        401 => "Your session has expired. Please log in again.".to_owned(),
        403 => "You do not have permission to perform this action.".to_owned(),
        404 => "The requested resource was not found.".to_owned(),
        500..=599 => "Server error. Please try again later.".to_owned(),
        _ => format!("Request failed with status {status}"),
    }
}
