// ── Core error types ──
//
// User-facing errors from attendly-core. Consumers never see HTTP status
// codes or JSON parse failures directly; `user_message` flattens every
// failure into the single string the UI renders inline.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The request could not be sent or the response never arrived.
    #[error("Cannot reach the directory service: {reason}")]
    Transport { reason: String },

    /// The service answered with a failure status, optionally carrying a
    /// `detail` message in the body.
    #[error("Service error (HTTP {status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    /// Post-create lookup failed to find the new record.
    #[error("Employee created but not found: {employee_id}")]
    Consistency { employee_id: String },

    /// Configuration problem (bad base URL and the like).
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Anything that should never surface to users verbatim.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The single message shown to the user for this failure.
    ///
    /// Policy: a server-supplied `detail` wins; the consistency error has
    /// its own fixed message; everything else gets the operation-specific
    /// fallback (e.g. "Failed to create employee").
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Consistency { .. } => "Employee created but not found".to_owned(),
            _ => fallback.to_owned(),
        }
    }
}

// ── Conversion from adapter errors ───────────────────────────────────

impl From<attendly_api::Error> for CoreError {
    fn from(err: attendly_api::Error) -> Self {
        match err {
            attendly_api::Error::Transport(e) => CoreError::Transport {
                reason: e.to_string(),
            },
            attendly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            attendly_api::Error::Api { status, detail } => CoreError::Server { status, detail },
            attendly_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            attendly_api::Error::CreatedButMissing { employee_id } => {
                CoreError::Consistency { employee_id }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_wins_over_fallback() {
        let err = CoreError::Server {
            status: 409,
            detail: Some("employee_id already taken".into()),
        };
        assert_eq!(
            err.user_message("Failed to create employee"),
            "employee_id already taken"
        );
    }

    #[test]
    fn missing_detail_uses_fallback() {
        let err = CoreError::Server {
            status: 500,
            detail: None,
        };
        assert_eq!(
            err.user_message("Failed to delete employee"),
            "Failed to delete employee"
        );
    }

    #[test]
    fn transport_uses_fallback() {
        let err = CoreError::Transport {
            reason: "connection refused".into(),
        };
        assert_eq!(err.user_message("Failed to load data"), "Failed to load data");
    }

    #[test]
    fn consistency_has_fixed_message() {
        let err = CoreError::Consistency {
            employee_id: "E1".into(),
        };
        assert_eq!(
            err.user_message("Failed to create employee"),
            "Employee created but not found"
        );
    }
}
