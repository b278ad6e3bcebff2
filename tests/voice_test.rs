//! Voice capture: adapter sequencing with stubs, HTTP transcription via wiremock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use penwright::voice::{
    AudioClip, CaptureConfig, CapturePhase, CaptureResult, HttpTranscriber, Recorder, Transcriber,
    VoiceCaptureAdapter, wav,
};
use penwright::{ErrorKind, PenwrightError, RecognitionFailure};

// ============================================================================
// Stubs
// ============================================================================

#[derive(Clone, Default)]
struct SilentRecorder {
    requested: Arc<Mutex<Option<Duration>>>,
}

#[async_trait]
impl Recorder for SilentRecorder {
    fn name(&self) -> &str {
        "silent"
    }

    async fn record(&self, duration: Duration) -> CaptureResult<AudioClip> {
        *self.requested.lock().unwrap() = Some(duration);
        Ok(clip())
    }
}

struct DeadRecorder;

#[async_trait]
impl Recorder for DeadRecorder {
    fn name(&self) -> &str {
        "dead"
    }

    async fn record(&self, _duration: Duration) -> CaptureResult<AudioClip> {
        Err(RecognitionFailure::ServiceError("no input device".into()))
    }
}

struct FixedTranscriber(&'static str);

#[async_trait]
impl Transcriber for FixedTranscriber {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn transcribe(&self, _clip: &AudioClip) -> CaptureResult<String> {
        Ok(self.0.to_string())
    }
}

fn clip() -> AudioClip {
    AudioClip {
        samples: vec![0.0; 4_410],
        sample_rate: 44_100,
        channels: 1,
    }
}

// ============================================================================
// Adapter
// ============================================================================

#[tokio::test(start_paused = true)]
async fn phases_run_in_order() {
    let recorder = SilentRecorder::default();
    let adapter = VoiceCaptureAdapter::new(
        recorder.clone(),
        FixedTranscriber("  solar sails \n"),
        CaptureConfig::default(),
    );

    let mut phases = Vec::new();
    let started = tokio::time::Instant::now();
    let topic = adapter
        .capture_with_progress(|phase| phases.push(phase))
        .await
        .unwrap();

    assert_eq!(topic, "solar sails");
    assert_eq!(
        phases,
        vec![
            CapturePhase::Countdown { remaining_secs: 3 },
            CapturePhase::Countdown { remaining_secs: 2 },
            CapturePhase::Countdown { remaining_secs: 1 },
            CapturePhase::Recording,
            CapturePhase::Transcribing,
        ]
    );
    assert!(started.elapsed() >= Duration::from_secs(3));
    assert_eq!(*recorder.requested.lock().unwrap(), Some(Duration::from_secs(5)));
}

#[tokio::test(start_paused = true)]
async fn zero_countdown_records_immediately() {
    let adapter = VoiceCaptureAdapter::new(
        SilentRecorder::default(),
        FixedTranscriber("kelp"),
        CaptureConfig::new().countdown_secs(0),
    );

    let mut phases = Vec::new();
    adapter
        .capture_with_progress(|phase| phases.push(phase))
        .await
        .unwrap();
    assert_eq!(phases.first(), Some(&CapturePhase::Recording));
}

#[tokio::test(start_paused = true)]
async fn blank_transcript_is_unintelligible() {
    let adapter = VoiceCaptureAdapter::new(
        SilentRecorder::default(),
        FixedTranscriber("   "),
        CaptureConfig::default(),
    );
    assert_eq!(
        adapter.capture_spoken_topic().await,
        Err(RecognitionFailure::Unintelligible)
    );
}

#[tokio::test(start_paused = true)]
async fn recorder_failure_skips_transcription() {
    let adapter = VoiceCaptureAdapter::new(
        DeadRecorder,
        FixedTranscriber("never"),
        CaptureConfig::default(),
    );

    let mut phases = Vec::new();
    let err = adapter
        .capture_with_progress(|phase| phases.push(phase))
        .await
        .unwrap_err();

    assert!(matches!(err, RecognitionFailure::ServiceError(_)));
    assert!(!phases.contains(&CapturePhase::Transcribing));

    let err: PenwrightError = err.into();
    assert_eq!(err.kind(), ErrorKind::RecognitionFailure);
}

// ============================================================================
// WAV encoding
// ============================================================================

#[test]
fn wav_upload_describes_clip() {
    let bytes = wav::encode(&clip()).unwrap();
    let reader = hound::WavReader::new(std::io::Cursor::new(bytes)).unwrap();
    assert_eq!(reader.spec().sample_rate, 44_100);
    assert_eq!(reader.spec().bits_per_sample, 16);
    assert_eq!(reader.duration(), 4_410);
}

// ============================================================================
// HttpTranscriber
// ============================================================================

fn transcriber_for(server: &MockServer) -> HttpTranscriber {
    HttpTranscriber::new(format!("{}/transcribe", server.uri()))
}

#[tokio::test]
async fn http_transcriber_returns_trimmed_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .and(header("content-type", "audio/wav"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": " tidal power "})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let text = transcriber_for(&server).transcribe(&clip()).await.unwrap();
    assert_eq!(text, "tidal power");
}

#[tokio::test]
async fn http_422_is_unintelligible() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let err = transcriber_for(&server).transcribe(&clip()).await.unwrap_err();
    assert_eq!(err, RecognitionFailure::Unintelligible);
}

#[tokio::test]
async fn http_empty_text_is_unintelligible() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": ""})))
        .mount(&server)
        .await;

    let err = transcriber_for(&server).transcribe(&clip()).await.unwrap_err();
    assert_eq!(err, RecognitionFailure::Unintelligible);
}

#[tokio::test]
async fn http_missing_text_is_unintelligible() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let err = transcriber_for(&server).transcribe(&clip()).await.unwrap_err();
    assert_eq!(err, RecognitionFailure::Unintelligible);
}

#[tokio::test]
async fn http_server_error_is_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    match transcriber_for(&server).transcribe(&clip()).await {
        Err(RecognitionFailure::ServiceError(msg)) => {
            assert!(msg.contains("503"));
            assert!(msg.contains("quota exceeded"));
        }
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_service_error() {
    let transcriber = HttpTranscriber::new("http://127.0.0.1:1/transcribe");
    let err = transcriber.transcribe(&clip()).await.unwrap_err();
    assert!(matches!(err, RecognitionFailure::ServiceError(_)));
}
