//! Penwright error types

use serde::{Deserialize, Serialize};

/// Why a generation request was rejected before any work was done.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("topic is empty")]
    EmptyTopic,

    #[error("word count {value} is outside {min}..={max}")]
    WordCountOutOfRange { value: i64, min: u32, max: u32 },

    #[error("unknown style: {0}")]
    UnknownStyle(String),
}

/// Failure at the voice capture boundary. Either way, no topic text is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionFailure {
    /// Audio was captured but could not be turned into text.
    #[error("speech could not be understood")]
    Unintelligible,

    /// The capture device or transcription backend failed.
    #[error("speech recognition service error: {0}")]
    ServiceError(String),
}

/// Penwright error types
#[derive(Debug, thiserror::Error)]
pub enum PenwrightError {
    // Request errors
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    // Model errors
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("generation service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("inference failed: {0}")]
    Inference(String),

    // Artifact errors
    #[error("encoding error: {0}")]
    Encoding(String),

    // Voice errors
    #[error(transparent)]
    Recognition(#[from] RecognitionFailure),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Flat discriminant of [`PenwrightError`], for callers that pick a
/// user-facing message per failure without matching on payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyTopic,
    WordCountOutOfRange,
    UnknownStyle,
    ModelUnavailable,
    ServiceUnavailable,
    InferenceError,
    EncodingError,
    Unintelligible,
    RecognitionFailure,
    Configuration,
}

impl ErrorKind {
    /// Stable snake_case name, also used as a metrics label.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::EmptyTopic => "empty_topic",
            ErrorKind::WordCountOutOfRange => "word_count_out_of_range",
            ErrorKind::UnknownStyle => "unknown_style",
            ErrorKind::ModelUnavailable => "model_unavailable",
            ErrorKind::ServiceUnavailable => "service_unavailable",
            ErrorKind::InferenceError => "inference_error",
            ErrorKind::EncodingError => "encoding_error",
            ErrorKind::Unintelligible => "unintelligible",
            ErrorKind::RecognitionFailure => "recognition_failure",
            ErrorKind::Configuration => "configuration",
        }
    }

    /// Whether the user can fix this by changing their input and retrying.
    ///
    /// Model and service unavailability block the whole session instead.
    pub fn is_user_correctable(self) -> bool {
        matches!(
            self,
            ErrorKind::EmptyTopic
                | ErrorKind::WordCountOutOfRange
                | ErrorKind::UnknownStyle
                | ErrorKind::Unintelligible
                | ErrorKind::RecognitionFailure
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&ValidationError> for ErrorKind {
    fn from(err: &ValidationError) -> Self {
        match err {
            ValidationError::EmptyTopic => ErrorKind::EmptyTopic,
            ValidationError::WordCountOutOfRange { .. } => ErrorKind::WordCountOutOfRange,
            ValidationError::UnknownStyle(_) => ErrorKind::UnknownStyle,
        }
    }
}

impl From<&RecognitionFailure> for ErrorKind {
    fn from(err: &RecognitionFailure) -> Self {
        match err {
            RecognitionFailure::Unintelligible => ErrorKind::Unintelligible,
            RecognitionFailure::ServiceError(_) => ErrorKind::RecognitionFailure,
        }
    }
}

impl PenwrightError {
    /// Classify this error for the presentation layer.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PenwrightError::Validation(e) => e.into(),
            PenwrightError::ModelUnavailable(_) => ErrorKind::ModelUnavailable,
            PenwrightError::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
            PenwrightError::Inference(_) => ErrorKind::InferenceError,
            PenwrightError::Encoding(_) => ErrorKind::EncodingError,
            PenwrightError::Recognition(e) => e.into(),
            PenwrightError::Configuration(_) => ErrorKind::Configuration,
        }
    }
}

/// Result type alias for Penwright operations
pub type Result<T> = std::result::Result<T, PenwrightError>;
