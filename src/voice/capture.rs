//! Spoken-topic capture: countdown, record, transcribe.
//!
//! [`VoiceCaptureAdapter`] is the only voice type the rest of the crate
//! needs. It yields a plain topic string, or a [`RecognitionFailure`] in
//! which case the caller must not run generation at all.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::error::{ErrorKind, RecognitionFailure};
use crate::telemetry;

/// Result type at the voice boundary.
pub type CaptureResult<T> = std::result::Result<T, RecognitionFailure>;

/// A buffer of recorded audio.
///
/// Samples are interleaved `f32` in `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
}

impl AudioClip {
    /// Playback length of the clip.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 || self.channels == 0 {
            return Duration::ZERO;
        }
        let frames = self.samples.len() as f64 / f64::from(self.channels);
        Duration::from_secs_f64(frames / f64::from(self.sample_rate))
    }
}

/// Records a fixed stretch of audio.
#[async_trait]
pub trait Recorder: Send + Sync {
    /// Recorder name for logging/debugging.
    fn name(&self) -> &str;

    /// Block (asynchronously) for `duration` and return what was heard.
    ///
    /// Device failures are reported as [`RecognitionFailure::ServiceError`].
    async fn record(&self, duration: Duration) -> CaptureResult<AudioClip>;
}

/// Turns recorded audio into text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcriber name for logging/debugging.
    fn name(&self) -> &str;

    async fn transcribe(&self, clip: &AudioClip) -> CaptureResult<String>;
}

/// Timing of a capture run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Seconds of countdown before recording starts. Default: 3.
    pub countdown_secs: u32,
    /// Length of the recording. Default: 5 seconds.
    pub duration: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            countdown_secs: 3,
            duration: Duration::from_secs(5),
        }
    }
}

impl CaptureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn countdown_secs(mut self, secs: u32) -> Self {
        self.countdown_secs = secs;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Progress of a capture run, for countdown and status displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    /// Recording starts in `remaining_secs`.
    Countdown { remaining_secs: u32 },
    Recording,
    Transcribing,
}

/// Captures a spoken topic with a [`Recorder`] and a [`Transcriber`].
///
/// Independent of generation: the adapter never calls the
/// [`GenerationService`](crate::GenerationService), it only produces the
/// string a caller hands to it.
pub struct VoiceCaptureAdapter<R, T> {
    recorder: R,
    transcriber: T,
    config: CaptureConfig,
}

impl<R: Recorder, T: Transcriber> VoiceCaptureAdapter<R, T> {
    pub fn new(recorder: R, transcriber: T, config: CaptureConfig) -> Self {
        Self {
            recorder,
            transcriber,
            config,
        }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Count down, record, transcribe.
    ///
    /// Returns the transcript trimmed of surrounding whitespace. A transcript
    /// that is empty after trimming is [`RecognitionFailure::Unintelligible`].
    pub async fn capture_spoken_topic(&self) -> CaptureResult<String> {
        self.capture_with_progress(|_| {}).await
    }

    /// [`capture_spoken_topic`](Self::capture_spoken_topic), reporting each
    /// phase to `progress` as it begins.
    #[instrument(name = "voice.capture", skip_all, fields(recorder = self.recorder.name(), transcriber = self.transcriber.name()))]
    pub async fn capture_with_progress<F>(&self, mut progress: F) -> CaptureResult<String>
    where
        F: FnMut(CapturePhase) + Send,
    {
        let outcome = self.run(&mut progress).await;
        match &outcome {
            Ok(_) => {
                metrics::counter!(telemetry::VOICE_CAPTURES_TOTAL, "status" => "ok").increment(1)
            }
            Err(e) => {
                warn!(error = %e, "voice capture produced no topic");
                metrics::counter!(
                    telemetry::VOICE_CAPTURES_TOTAL,
                    "status" => "error",
                    "kind" => ErrorKind::from(e).as_str()
                )
                .increment(1)
            }
        }
        outcome
    }

    async fn run<F>(&self, progress: &mut F) -> CaptureResult<String>
    where
        F: FnMut(CapturePhase) + Send,
    {
        for remaining_secs in (1..=self.config.countdown_secs).rev() {
            progress(CapturePhase::Countdown { remaining_secs });
            info!(remaining_secs, "recording starts soon");
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        progress(CapturePhase::Recording);
        info!(duration = ?self.config.duration, "recording");
        let clip = self.recorder.record(self.config.duration).await?;

        progress(CapturePhase::Transcribing);
        info!(captured = ?clip.duration(), "transcribing");
        let transcript = self.transcriber.transcribe(&clip).await?;

        let topic = transcript.trim();
        if topic.is_empty() {
            return Err(RecognitionFailure::Unintelligible);
        }
        Ok(topic.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_duration_accounts_for_channels() {
        let clip = AudioClip {
            samples: vec![0.0; 88_200],
            sample_rate: 44_100,
            channels: 2,
        };
        assert_eq!(clip.duration(), Duration::from_secs(1));
    }

    #[test]
    fn empty_format_has_zero_duration() {
        let clip = AudioClip {
            samples: vec![0.0; 10],
            sample_rate: 0,
            channels: 1,
        };
        assert_eq!(clip.duration(), Duration::ZERO);
    }
}
