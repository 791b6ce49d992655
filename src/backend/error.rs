use thiserror::Error;

use crate::error::ChartError;

pub type BackendResult<T> = Result<T, BackendError>;

/// Message reported by every operation of the not-configured fallback.
pub const NOT_CONFIGURED_MESSAGE: &str = "Supabase not configured";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Supabase not configured")]
    NotConfigured,

    #[error("no active session")]
    NoSession,

    #[error("http request failed: {0}")]
    Http(String),

    #[error("{message} (status {status})")]
    Api { status: u16, message: String },

    #[error("failed to encode request: {0}")]
    Encode(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("realtime channel failure: {0}")]
    Realtime(String),

    #[error(transparent)]
    Storage(#[from] ChartError),
}

impl BackendError {
    #[must_use]
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured)
    }
}
