//! Error types for the VoiceBook pipeline.

use thiserror::Error;

/// Errors raised by configuration loading and the social repository.
///
/// Nothing here ends a voice turn: the session reports the error as a status
/// line and goes back to idle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoicebookError {
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    #[error("IO error: {message}")]
    Io { message: String },

    /// A config file or payload could not be decoded.
    #[error("Invalid {format}: {message}")]
    Serialization {
        format: &'static str,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    /// The social repository failed for a reason other than a missing entity.
    #[error("Repository error: {0}")]
    DataAccess(String),

    /// A voice turn is already being processed.
    #[error("Busy: {0}")]
    Busy(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl VoicebookError {
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    pub fn busy(message: impl Into<String>) -> Self {
        Self::Busy(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for VoicebookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} ({:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for VoicebookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON",
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for VoicebookError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML",
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VoicebookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = VoicebookError::not_found("user", "u_9");
        assert!(err.is_not_found());
        assert!(!err.is_busy());
        assert_eq!(err.to_string(), "user 'u_9' not found");
    }

    #[test]
    fn test_decode_errors_name_their_format() {
        let err: VoicebookError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, VoicebookError::Serialization { format: "JSON", .. }));

        let err: VoicebookError = toml::from_str::<toml::Value>("= nope").unwrap_err().into();
        assert!(err.to_string().starts_with("Invalid TOML"));
    }
}
