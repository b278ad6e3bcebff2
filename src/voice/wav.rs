//! 16-bit PCM WAV encoding for transcription uploads.

use std::io::Cursor;

use super::{AudioClip, CaptureResult};
use crate::error::RecognitionFailure;

const BITS_PER_SAMPLE: u16 = 16;

/// Encode a clip as a RIFF/WAVE file with 16-bit integer samples.
///
/// Samples outside `[-1.0, 1.0]` are clamped.
pub fn encode(clip: &AudioClip) -> CaptureResult<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: clip.channels,
        sample_rate: clip.sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };

    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).map_err(wav_error)?;
        for sample in &clip.samples {
            writer.write_sample(to_i16(*sample)).map_err(wav_error)?;
        }
        writer.finalize().map_err(wav_error)?;
    }
    Ok(bytes)
}

fn wav_error(e: hound::Error) -> RecognitionFailure {
    RecognitionFailure::ServiceError(format!("failed to encode audio: {e}"))
}

fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)).round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(samples: Vec<f32>, channels: u16) -> AudioClip {
        AudioClip {
            samples,
            sample_rate: 44_100,
            channels,
        }
    }

    #[test]
    fn encoded_clip_reads_back() {
        let wav = encode(&clip(vec![0.0, 0.5, -0.5, 1.0], 1)).unwrap();

        let mut reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44_100);
        assert_eq!(spec.bits_per_sample, 16);

        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0, 16384, -16384, i16::MAX]);
    }

    #[test]
    fn stereo_keeps_interleaving() {
        let wav = encode(&clip(vec![0.1, -0.1, 0.2, -0.2], 2)).unwrap();
        let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.duration(), 2);
    }

    #[test]
    fn samples_are_clamped() {
        assert_eq!(to_i16(2.0), i16::MAX);
        assert_eq!(to_i16(-2.0), -i16::MAX);
        assert_eq!(to_i16(0.0), 0);
    }
}
