//! Errors raised inside reducers during a commit.

use thiserror::Error;

/// Failure of a reducer while a commit is in flight.
///
/// These never reach the `dispatch` caller: the commit pipeline logs them
/// and leaves the snapshot untouched.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("action '{0}' requires a payload but none was supplied")]
    MissingPayload(String),

    #[error("failed to decode payload for action '{kind}': {source}")]
    PayloadDecode {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("reducer for action '{kind}' failed: {message}")]
    Failed { kind: String, message: String },
}

impl HandlerError {
    /// Wrap a reducer's own failure message.
    pub fn failed(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            kind: kind.into(),
            message: message.into(),
        }
    }
}
