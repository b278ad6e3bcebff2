use penwright::{ErrorKind, PenwrightError, RecognitionFailure, Result, ValidationError};

#[test]
fn test_error_display() {
    let err = PenwrightError::ModelUnavailable("model.bin not found".to_string());
    assert!(err.to_string().contains("model.bin"));
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(PenwrightError::Inference("boom".into()))
    }
    assert!(returns_error().is_err());
}

#[test]
fn recognition_failure_display_is_transparent() {
    let err: PenwrightError = RecognitionFailure::Unintelligible.into();
    assert_eq!(err.to_string(), RecognitionFailure::Unintelligible.to_string());
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn every_variant_maps_to_its_kind() {
    let cases: Vec<(PenwrightError, ErrorKind)> = vec![
        (ValidationError::EmptyTopic.into(), ErrorKind::EmptyTopic),
        (
            ValidationError::WordCountOutOfRange {
                value: 5,
                min: 100,
                max: 1000,
            }
            .into(),
            ErrorKind::WordCountOutOfRange,
        ),
        (
            ValidationError::UnknownStyle("poetic".into()).into(),
            ErrorKind::UnknownStyle,
        ),
        (
            PenwrightError::ModelUnavailable("x".into()),
            ErrorKind::ModelUnavailable,
        ),
        (
            PenwrightError::ServiceUnavailable("x".into()),
            ErrorKind::ServiceUnavailable,
        ),
        (PenwrightError::Inference("x".into()), ErrorKind::InferenceError),
        (PenwrightError::Encoding("x".into()), ErrorKind::EncodingError),
        (
            RecognitionFailure::Unintelligible.into(),
            ErrorKind::Unintelligible,
        ),
        (
            RecognitionFailure::ServiceError("x".into()).into(),
            ErrorKind::RecognitionFailure,
        ),
        (
            PenwrightError::Configuration("x".into()),
            ErrorKind::Configuration,
        ),
    ];

    for (err, kind) in cases {
        assert_eq!(err.kind(), kind, "{err}");
    }
}

#[test]
fn input_errors_are_user_correctable() {
    assert!(ErrorKind::EmptyTopic.is_user_correctable());
    assert!(ErrorKind::WordCountOutOfRange.is_user_correctable());
    assert!(ErrorKind::UnknownStyle.is_user_correctable());
    assert!(ErrorKind::Unintelligible.is_user_correctable());
}

#[test]
fn availability_errors_are_not_user_correctable() {
    assert!(!ErrorKind::ModelUnavailable.is_user_correctable());
    assert!(!ErrorKind::ServiceUnavailable.is_user_correctable());
    assert!(!ErrorKind::Configuration.is_user_correctable());
}

#[test]
fn kind_serializes_as_snake_case() {
    let json = serde_json::to_string(&ErrorKind::WordCountOutOfRange).unwrap();
    assert_eq!(json, "\"word_count_out_of_range\"");
    assert_eq!(ErrorKind::InferenceError.to_string(), "inference_error");
}
