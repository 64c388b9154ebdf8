use thiserror::Error;

/// Failure of a single forwarded invocation.
///
/// The gateway collapses every variant into the same 500 response; the
/// variants exist so logs and callers can still tell them apart.
#[derive(Error, Debug)]
pub enum InvokeError {
    /// The outbound request could not be built (payload serialization,
    /// missing credentials, malformed endpoint).
    #[error("{0}")]
    Envelope(String),

    /// Connection or I/O failure talking to the invocation API.
    #[error("{0}")]
    Transport(String),

    /// The outbound call exceeded its time bound.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The invocation API answered with a non-success status.
    #[error("An error occurred ({status}) when calling the Invoke operation: {message}")]
    Remote {
        /// HTTP status returned by the invocation API.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },

    /// The returned payload is not valid JSON.
    #[error("{0}")]
    Decode(String),
}

impl InvokeError {
    /// Stable label used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Envelope(_) => "envelope",
            Self::Transport(_) => "transport",
            Self::Timeout(_) => "timeout",
            Self::Remote { .. } => "remote",
            Self::Decode(_) => "decode",
        }
    }

    /// Whether repeating the same invocation could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::Remote { status, .. } => *status == 429 || *status >= 500,
            Self::Envelope(_) | Self::Decode(_) => false,
        }
    }
}

impl From<serde_json::Error> for InvokeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Envelope(e.to_string())
    }
}

/// Process-level error for configuration and startup.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Invalid or unreadable configuration.
    #[error("Config error: {0}")]
    Config(String),

    /// A forwarded invocation failed.
    #[error("Invocation error: {0}")]
    Invoke(#[from] InvokeError),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`RelayError`].
pub type RelayResult<T> = Result<T, RelayError>;
