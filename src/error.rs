//! Error types for the brief I/O shell
//!
//! The text pipeline itself is total and never fails. Errors only come from
//! the edges around it:
//! - Config: missing home directory, malformed config.json
//! - Store: unknown share token, unreadable brief store
//! - Input: unreadable report file, malformed search response

use std::path::PathBuf;
use thiserror::Error;

/// Error types for loading, saving and exporting briefs
#[derive(Debug, Error)]
pub enum BriefError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to parse JSON: {0}")]
    Json(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Could not find home directory")]
    HomeDirUnavailable,

    #[error("No saved brief for share token {0}")]
    BriefNotFound(String),

    #[error("Invalid search response: {0}")]
    InvalidSearchResponse(String),
}

impl BriefError {
    /// Get a user-friendly recovery suggestion
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BriefError::Io(_) => "Check file permissions and disk space.",
            BriefError::Json(_) => "Check the file contains valid JSON.",
            BriefError::ConfigNotFound(_) => {
                "Create ~/.marketbrief/config.json or run without a config file."
            }
            BriefError::HomeDirUnavailable => "Set HOME or pass explicit paths.",
            BriefError::BriefNotFound(_) => "Check the share link, or save the brief again.",
            BriefError::InvalidSearchResponse(_) => {
                "Pass the raw JSON returned by the search provider."
            }
        }
    }
}

impl From<std::io::Error> for BriefError {
    fn from(err: std::io::Error) -> Self {
        BriefError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BriefError {
    fn from(err: serde_json::Error) -> Self {
        BriefError::Json(err.to_string())
    }
}

/// Serializable error representation for host UIs
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub message: String,
    pub recovery_suggestion: String,
}

impl From<&BriefError> for ErrorPayload {
    fn from(err: &BriefError) -> Self {
        ErrorPayload {
            message: err.to_string(),
            recovery_suggestion: err.recovery_suggestion().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_with_message() {
        let err: BriefError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing report").into();
        assert!(matches!(err, BriefError::Io(_)));
        assert_eq!(err.to_string(), "IO error: missing report");
    }

    #[test]
    fn payload_carries_suggestion() {
        let err = BriefError::BriefNotFound("abc".to_string());
        let payload = ErrorPayload::from(&err);
        assert_eq!(payload.message, "No saved brief for share token abc");
        assert_eq!(payload.recovery_suggestion, err.recovery_suggestion());

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("recoverySuggestion").is_some());
    }
}
