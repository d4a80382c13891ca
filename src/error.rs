//! Error types for the library client.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Everything that can go wrong between a user action and the server.
///
/// The `Display` text is what ends up in the status pill, so it is kept short
/// and user-facing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("Enter a search query")]
    EmptyQuery,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Server returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Build a status error from a non-2xx response body.
    ///
    /// Servers answer errors with `{"detail": ...}` or `{"message": ...}`; when
    /// neither is present the detail falls back to the status line.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = server_message(body).unwrap_or_else(|| format!("HTTP {}", status));
        ClientError::Status { status, detail }
    }
}

fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    // A null or blank `detail` falls through to `message`
    ["detail", "message"]
        .into_iter()
        .find_map(|key| match value.get(key)? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Null | serde_json::Value::String(_) => None,
            // Validation errors come back as structured arrays
            other => Some(other.to_string()),
        })
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
