use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything a client call can fail with.
///
/// Failures are returned to the caller of the operation that triggered them;
/// nothing is retried and no partial result is ever produced.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection, DNS, TLS or timeout failure reported by the HTTP client.
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("request to {url} failed with status {status}: {body}")]
    RequestFailed {
        status: StatusCode,
        url: String,
        body: String,
    },

    /// The payload does not match the entity shape it was decoded into.
    #[error("failed to decode {shape}: {reason}")]
    DecodeFailed { shape: &'static str, reason: String },

    /// The response carried a content type that is neither JSON nor plain text.
    #[error("unsupported response content type '{0}'")]
    UnsupportedContentType(String),
}

impl Error {
    pub(crate) fn decode(shape: &'static str, reason: impl Into<String>) -> Self {
        Error::DecodeFailed {
            shape,
            reason: reason.into(),
        }
    }

    /// HTTP status of a failed request, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::RequestFailed { status, .. } => Some(*status),
            Error::Transport(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::DecodeFailed { .. })
    }
}
