//! Error types for the Ex Libris client.

/// Errors that can occur when interacting with the Alma / Primo APIs.
#[derive(Debug, thiserror::Error)]
pub enum ExLibrisError {
    /// HTTP request failed (network, DNS, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status. Alma error payloads are
    /// not parsed; the raw body is handed back untouched.
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// Unrecognized region tag (valid tags: `us`, `eu`, `apac`).
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    /// No usable user ID could be derived from the given user reference.
    #[error("Invalid user: no resolvable user ID")]
    InvalidUser,

    /// No API key provided.
    #[error("Authentication required: set EXLIBRIS_API_KEY environment variable or pass a key to ExLibrisClient::new()")]
    AuthRequired,

    /// Failed to parse an API response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for Results using [`ExLibrisError`].
pub type Result<T> = std::result::Result<T, ExLibrisError>;
