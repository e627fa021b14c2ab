// ================================================================
// File: xbot-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (connection refused, DNS, TLS, broken body...).
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The server answered with a non-2xx status code.
    #[error("HTTP错误: {0}")]
    Status(u16),

    /// The request did not settle within its time bound.
    #[error("请求超时，请稍后重试")]
    Timeout,

    /// The endpoint answered `{"success": false, ...}`.
    #[error("{0}")]
    Rejected(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True only for the "request ran out of time" failure kind.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout)
    }
}

// reqwest folds timeouts and status failures into one error type; split them
// back out so callers can match on the kind.
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if let Some(status) = err.status() {
            Error::Status(status.as_u16())
        } else {
            Error::Http(err)
        }
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Error::Timeout
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Rejected(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Rejected(s.to_string())
    }
}
