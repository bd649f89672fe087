//! Identity provider client errors.

use thiserror::Error;

/// Failures reported by an [`IdentityProvider`](super::IdentityProvider).
///
/// The set is closed on purpose: the user service maps each variant to a
/// caller-facing status without inspecting anything else.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider answered with a non-success HTTP status
    #[error("identity provider responded with {status}: {message}")]
    Status { status: u16, message: String },

    /// The provider could not be reached
    #[error("identity provider unreachable: {0}")]
    Transport(String),

    /// Anything else (undecodable payloads, rejected admin credentials)
    #[error("unexpected identity provider failure: {0}")]
    Unknown(String),
}

impl ProviderError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        ProviderError::Status {
            status,
            message: message.into(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        ProviderError::Transport(msg.into())
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        ProviderError::Unknown(msg.into())
    }

    /// Status code reported by the provider, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ProviderError::status(status.as_u16(), err.to_string())
        } else if err.is_decode() {
            ProviderError::unknown(err.to_string())
        } else if err.is_connect() || err.is_timeout() || err.is_request() {
            ProviderError::transport(err.to_string())
        } else {
            ProviderError::unknown(err.to_string())
        }
    }
}

/// Result type alias for provider calls
pub type ProviderResult<T> = Result<T, ProviderError>;
