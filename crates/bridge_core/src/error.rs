//! Error types for the LSP/MCP bridge
//!
//! Unified error handling using `thiserror` for the kinds the bridge's
//! error-handling design distinguishes, with `anyhow` for ad-hoc context
//! propagation at the edges.

use thiserror::Error;

/// The primary error type for bridge operations
#[derive(Error, Debug)]
pub enum Error {
    // ===== Transport errors =====
    #[error("LSP transport error: {0}")]
    Transport(String),

    // ===== JSON-RPC request errors =====
    #[error("LSP request failed ({code}): {message}")]
    Request { code: i64, message: String },

    #[error("no handler registered for server method: {0}")]
    MethodNotFound(String),

    #[error("server-request handler failed: {0}")]
    Handler(String),

    // ===== File errors =====
    #[error("cannot notify change for unopened file: {0}")]
    MissingOpenFile(String),

    // ===== Startup / configuration errors =====
    #[error("configuration error: {0}")]
    Config(String),

    // ===== Generic =====
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Error kind for categorizing errors, used by tools deciding whether to
/// surface an error verbatim or translate it into tool-call text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    Request,
    FileSystem,
    Config,
    Internal,
}

impl Error {
    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Transport,
            Error::Request { .. } | Error::MethodNotFound(_) | Error::Handler(_) => {
                ErrorKind::Request
            }
            Error::MissingOpenFile(_) | Error::Io(_) => ErrorKind::FileSystem,
            Error::Config(_) => ErrorKind::Config,
            Error::Json(_) | Error::Internal(_) | Error::Other(_) => ErrorKind::Internal,
        }
    }

    /// Whether a caller can reasonably retry or work around this error,
    /// as opposed to one that signals the session itself is unusable.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Request { .. } | Error::MissingOpenFile(_))
    }

    /// JSON-RPC error code to report back to the language server when this
    /// error occurred while handling a server-initiated request.
    pub fn rpc_code(&self) -> i64 {
        match self {
            Error::MethodNotFound(_) => -32601,
            _ => -32603,
        }
    }
}

/// Extension trait for adding context to errors at tool boundaries
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context<C>(self, context: C) -> crate::Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    /// Add context lazily
    fn with_context<C, F>(self, f: F) -> crate::Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> crate::Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Other(anyhow::Error::from(e).context(context)))
    }

    fn with_context<C, F>(self, f: F) -> crate::Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Other(anyhow::Error::from(e).context(f())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        let err = Error::MissingOpenFile("file:///tmp/a.rs".into());
        assert_eq!(err.kind(), ErrorKind::FileSystem);

        let err = Error::Request {
            code: -32600,
            message: "bad request".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Request);
    }

    #[test]
    fn test_rpc_code() {
        assert_eq!(Error::MethodNotFound("foo".into()).rpc_code(), -32601);
        assert_eq!(Error::Handler("boom".into()).rpc_code(), -32603);
    }

    #[test]
    fn test_recoverable() {
        assert!(
            Error::Request {
                code: -1,
                message: "x".into()
            }
            .is_recoverable()
        );
        assert!(!Error::Config("missing --workspace".into()).is_recoverable());
    }
}
