//! Core domain types for the VoiceBook voice-command pipeline.
//!
//! A spoken command travels as a transcript plus an [`NluContext`], comes
//! back from the NLU model as an [`NluResponse`], and is dispatched against a
//! [`SocialRepository`].

pub mod config;
pub mod context;
pub mod error;
pub mod intent;
pub mod similarity;
pub mod social;
pub mod voice;

// Re-export common types
pub use context::NluContext;
pub use error::{Result, VoicebookError};
pub use intent::{Intent, NluResponse, SlotValue, Slots};
pub use social::SocialRepository;
pub use voice::{SpeechError, VoiceState};
