//! Recording from the default input device via `cpal`.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use super::{AudioClip, CaptureResult, Recorder};
use crate::error::RecognitionFailure;

/// Records from the system default input device at its native format.
///
/// The cpal stream is not `Send` on every platform, so each recording runs
/// start to finish on a blocking worker thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrophoneRecorder;

impl MicrophoneRecorder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Recorder for MicrophoneRecorder {
    fn name(&self) -> &str {
        "microphone"
    }

    async fn record(&self, duration: Duration) -> CaptureResult<AudioClip> {
        tokio::task::spawn_blocking(move || record_blocking(duration))
            .await
            .map_err(|e| RecognitionFailure::ServiceError(format!("recording task failed: {e}")))?
    }
}

fn device_error(e: impl std::fmt::Display) -> RecognitionFailure {
    RecognitionFailure::ServiceError(format!("audio capture failed: {e}"))
}

fn record_blocking(duration: Duration) -> CaptureResult<AudioClip> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| device_error("no input device found on the default audio host"))?;

    let supported = device.default_input_config().map_err(device_error)?;
    if supported.sample_format() != cpal::SampleFormat::F32 {
        return Err(device_error(format!(
            "unsupported sample format {:?}",
            supported.sample_format()
        )));
    }
    let channels = supported.channels();
    let sample_rate = supported.sample_rate().0;
    let config: cpal::StreamConfig = supported.into();

    let buffer = Arc::new(Mutex::new(Vec::<f32>::new()));
    let sink = Arc::clone(&buffer);
    let stream = device
        .build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                if let Ok(mut samples) = sink.lock() {
                    samples.extend_from_slice(data);
                }
            },
            |err: cpal::StreamError| {
                tracing::error!(%err, "input stream error");
            },
            None,
        )
        .map_err(device_error)?;

    stream.play().map_err(device_error)?;
    std::thread::sleep(duration);
    drop(stream);

    let samples = std::mem::take(&mut *buffer.lock().unwrap_or_else(PoisonError::into_inner));
    Ok(AudioClip {
        samples,
        sample_rate,
        channels,
    })
}
