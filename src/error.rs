use thiserror::Error;

/// Unified error type for the gateway.
///
/// This aggregates transport, protocol, and dispatch failures into the fixed
/// taxonomy that UI collaborators are expected to branch on. `message` fields
/// carry backend-supplied text when the envelope provides it, so callers can
/// surface them to the end user verbatim.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport deadline elapsed before a response was received.
    #[error("request timed out")]
    Timeout,

    /// Connection-level failure (DNS, TLS, refused, reset).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered outside the 2xx range.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// HTTP 2xx but the envelope reported `success == false`.
    #[error("API error: {message}")]
    Api { message: String },

    /// Refresh failed, or the retried call was still rejected. Credentials
    /// have been cleared as a side effect; the caller must re-login.
    #[error("unauthorized: session expired and refresh failed")]
    Unauthorized,

    /// Channel name is not present in the static mapping table.
    #[error("unknown channel: {channel}")]
    UnknownChannel { channel: String },

    /// A path-template placeholder could not be resolved from the payload.
    /// Dispatch fails fast; an unresolved placeholder must never reach the
    /// backend.
    #[error("missing path parameter `{placeholder}` for channel `{channel}`")]
    MissingPathParameter {
        placeholder: String,
        channel: String,
    },

    /// Client-side misconfiguration (bad base URL, invalid payload shape).
    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Classify a `reqwest` failure: an elapsed deadline becomes [`Error::Timeout`],
    /// everything else stays a network error.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Network(err)
        }
    }

    /// Whether the caller should treat this as a session boundary and
    /// redirect to login.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }
}
