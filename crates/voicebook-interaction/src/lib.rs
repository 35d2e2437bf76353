//! NLU client for VoiceBook voice commands.
//!
//! Sends a transcript and its context to a hosted model, retries on rate
//! limits, and decodes the constrained JSON answer. Without a credential the
//! offline [`KeywordIntentMatcher`] is used instead.

pub mod backend;
pub mod backoff;
pub mod error;
pub mod gemini_api_backend;
pub mod keyword_matcher;
pub mod prompt;
pub mod resolver;
pub mod response_parser;

pub use backend::ModelBackend;
pub use backoff::{BackoffPolicy, Sleeper, TokioSleeper, retry_with_backoff};
pub use error::NluError;
pub use gemini_api_backend::GeminiApiBackend;
pub use keyword_matcher::KeywordIntentMatcher;
pub use resolver::{IntentResolver, NluClient, resolver_from_settings};
