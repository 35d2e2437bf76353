//! Voice turn states and speech capture errors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of the current voice turn.
///
/// A turn always runs `Idle -> Listening -> Processing -> Idle`; any error
/// drops straight back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceState {
    #[default]
    Idle,
    Listening,
    Processing,
}

impl fmt::Display for VoiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Listening => "listening",
            Self::Processing => "processing",
        };
        f.write_str(label)
    }
}

/// Error reported by the speech-to-text capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// Microphone access was refused.
    PermissionDenied,
    NoSpeech,
    Network,
    Aborted,
    Other(String),
}

impl SpeechError {
    /// Maps a browser speech-recognition error code.
    pub fn from_code(code: &str) -> Self {
        match code {
            "not-allowed" | "service-not-allowed" => Self::PermissionDenied,
            "no-speech" => Self::NoSpeech,
            "network" => Self::Network,
            "aborted" => Self::Aborted,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => f.write_str("microphone permission denied"),
            Self::NoSpeech => f.write_str("no speech detected"),
            Self::Network => f.write_str("speech service unreachable"),
            Self::Aborted => f.write_str("speech capture aborted"),
            Self::Other(code) => write!(f, "speech error: {code}"),
        }
    }
}
