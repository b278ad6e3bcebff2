//! Voice input boundary.
//!
//! Produces a topic string from speech. Nothing here depends on the
//! generation pipeline; callers pass the string on themselves.

mod capture;
mod http;
#[cfg(feature = "microphone")]
mod microphone;
pub mod wav;

pub use capture::{
    AudioClip, CaptureConfig, CapturePhase, CaptureResult, Recorder, Transcriber,
    VoiceCaptureAdapter,
};
pub use http::HttpTranscriber;
#[cfg(feature = "microphone")]
pub use microphone::MicrophoneRecorder;
