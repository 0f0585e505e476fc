//! Error taxonomy (Section 7).
//!
//! Stages 1-10 of the rules engine never raise for a normal candidate
//! rejection — they return a tagged outcome (`rules::Rejection`). Only
//! programming errors propagate as `RadarError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RadarError {
    /// Caller supplied a value outside its domain (negative money,
    /// non-positive rate, unknown enum). Not retried.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Network error, 5xx, or 429 from an upstream API. Retried with
    /// exponential backoff; becomes `SourceFailed` at exhaustion.
    #[error("transient source error ({source_name}): {message}")]
    SourceTransient { source_name: String, message: String },

    /// Non-retryable upstream error. Current poll is abandoned; sibling
    /// polls continue.
    #[error("source failed ({source_name}): {message}")]
    SourceFailed { source_name: String, message: String },

    /// Chat provider error. Counted, loop continues.
    #[error("delivery failed to channel {channel_id}: {message}")]
    DeliveryFailed { channel_id: String, message: String },

    /// DB unreachable at startup or during shutdown.
    #[error("fatal: {0}")]
    Fatal(String),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

pub type RadarResult<T> = Result<T, RadarError>;

impl RadarError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        RadarError::InvalidArgument(msg.into())
    }
}
