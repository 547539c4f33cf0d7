use thiserror::Error;

/// JSON-RPC "internal error", used when the backing node cannot be reached.
pub const INTERNAL_ERROR_CODE: i64 = -32603;
/// JSON-RPC "invalid params".
pub const INVALID_PARAMS_CODE: i64 = -32602;

/// Failures a `request()` call can surface. Unsupported methods are not an
/// error: they resolve to `null`.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The backing node was unreachable or the HTTP exchange failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backing node answered with a JSON-RPC error object.
    #[error("{message}")]
    Rpc { code: i64, message: String },

    #[error("malformed params for {method}: {reason}")]
    MalformedParams { method: String, reason: String },

    /// A subscriber failed while an event was being emitted.
    #[error("listener for '{event}' failed: {source}")]
    Listener {
        event: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ProviderError {
    /// Numeric code reported to JSON-RPC speaking callers.
    pub fn code(&self) -> i64 {
        match self {
            ProviderError::Rpc { code, .. } => *code,
            ProviderError::MalformedParams { .. } => INVALID_PARAMS_CODE,
            ProviderError::Transport(_) | ProviderError::Listener { .. } => INTERNAL_ERROR_CODE,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Transport(e.to_string())
    }
}
