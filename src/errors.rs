//! Crate-wide error taxonomy

use thiserror::Error;

/// Errors surfaced by command dispatch.
///
/// All errors propagate to the top of dispatch; there is no local
/// recovery except the single re-authentication retry in the request
/// pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Login failed: bad credentials, malformed token response, or a
    /// transport failure during the credential exchange.
    #[error("login failed: {0}")]
    Auth(String),

    /// Transport-level failure (connection refused, timeout, DNS).
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The server returned a structured application error or a non-2xx
    /// response; carries one message per reported error.
    #[error("{}", .messages.join("\n"))]
    Api { messages: Vec<String> },

    /// A referenced resource or principal does not exist.
    #[error("no {label} found with id {id}")]
    NotFound { label: String, id: String },

    /// Invalid script content.
    #[error("{0}")]
    Script(String),

    /// Invalid input, detected before any request was made.
    #[error("{0}")]
    Input(String),

    /// Missing or invalid configuration.
    #[error("{0}")]
    Config(String),

    /// Script or history file I/O.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for an unhandled failure, by error class.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Script(_) | Error::Input(_) | Error::Config(_) | Error::Io(_) => 1,
            Error::Auth(_) => 3,
            Error::Request(_) | Error::Api { .. } | Error::NotFound { .. } => 2,
        }
    }
}
