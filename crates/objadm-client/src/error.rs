//! Client error types.

use objadm_proto::InvalidAssociation;

/// Errors that can occur during client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A transport-level error (connection, TLS, timeout, etc.).
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message} (HTTP {status}{})", code_suffix(.code))]
    Status {
        status: u16,
        code: String,
        message: String,
    },

    /// The request was rejected before being sent.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] InvalidAssociation),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The alias is not present in the client configuration.
    #[error("no alias named '{0}' is configured")]
    UnknownAlias(String),

    /// Configuration could not be read or is invalid.
    #[error("config error: {0}")]
    Config(String),
}

fn code_suffix(code: &str) -> String {
    if code.is_empty() {
        String::new()
    } else {
        format!(", {}", code)
    }
}

/// Convenience result type.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
