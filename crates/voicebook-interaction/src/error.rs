//! Errors raised while talking to the NLU model.
//!
//! None of these reach the voice session: the client collapses every one of
//! them into an `unknown` intent.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NluError {
    /// Non-success HTTP status from the model endpoint
    #[error("NLU request failed with status {status}: {message}")]
    Http {
        status: u16,
        message: String,
        rate_limited: bool,
        retry_after: Option<Duration>,
    },

    /// Connection, timeout or body read failure
    #[error("NLU transport error: {0}")]
    Transport(String),

    /// The endpoint answered but carried no text
    #[error("NLU response contained no text")]
    EmptyResponse,

    /// The response envelope (not the model text) could not be decoded
    #[error("Failed to decode NLU envelope: {0}")]
    Decode(String),
}

impl NluError {
    /// Creates a rate-limit error as an HTTP 429 would produce.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::Http {
            status: 429,
            message: message.into(),
            rate_limited: true,
            retry_after: None,
        }
    }

    /// True for HTTP 429 and `RESOURCE_EXHAUSTED` responses, the only errors
    /// worth retrying.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            Self::Http {
                rate_limited: true,
                ..
            }
        )
    }
}
