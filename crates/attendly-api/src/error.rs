use thiserror::Error;

/// Top-level error type for the `attendly-api` crate.
///
/// Covers every failure mode of the directory service adapter: transport,
/// server-reported errors, and the post-create reconciliation miss.
/// `attendly-core` flattens these into user-facing message strings.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Server ──────────────────────────────────────────────────────
    /// Non-2xx response. `detail` carries the service's optional
    /// `{"detail": "..."}` message when the body had one.
    #[error("API error (HTTP {status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Consistency ─────────────────────────────────────────────────
    /// The creation endpoint accepted the record, but the follow-up
    /// re-list did not contain it.
    #[error("Employee created but not found: {employee_id}")]
    CreatedButMissing { employee_id: String },
}

impl Error {
    /// The server-supplied detail message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }
}
