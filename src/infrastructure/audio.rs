//! WAV container I/O: decoding the backend's mono track and encoding the
//! stereo result as 16-bit PCM.

use crate::domain::entities::{MonoTrack, StereoBuffer};
use crate::domain::errors::AppError;
use dasp_rs::signal_processing::resampling::resample;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::Cursor;

pub const WAV_HEADER_LEN: usize = 44;

/// Decodes a WAV byte stream into normalized `f32` samples.
///
/// Multi-channel sources keep only their first channel.
pub fn decode_mono(bytes: &[u8]) -> Result<MonoTrack, AppError> {
    let reader = WavReader::new(Cursor::new(bytes)).map_err(|e| AppError::Decode(e.to_string()))?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(AppError::Decode("source declares zero channels".into()));
    }
    let stride = spec.channels as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| AppError::Decode(e.to_string()))?,
        SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(|e| AppError::Decode(e.to_string()))?
        }
    };

    let samples = interleaved.into_iter().step_by(stride).collect();
    Ok(MonoTrack::new(samples, spec.sample_rate))
}

pub fn resample_track(track: MonoTrack, target_rate: u32) -> Result<MonoTrack, AppError> {
    if track.sample_rate == target_rate {
        return Ok(track);
    }
    if track.samples.is_empty() {
        return Ok(MonoTrack::new(Vec::new(), target_rate));
    }
    let samples = resample(&track.samples, track.sample_rate, target_rate)?;
    Ok(MonoTrack::new(samples, target_rate))
}

fn quantize(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16
}

/// Encodes two equal-length channels as a canonical 16-bit stereo WAV.
pub fn encode(left: &[f32], right: &[f32], sample_rate: u32) -> Result<Vec<u8>, AppError> {
    if left.len() != right.len() {
        return Err(AppError::ChannelLengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::with_capacity(WAV_HEADER_LEN + left.len() * 4));
    let mut writer = WavWriter::new(&mut cursor, spec)?;
    for (&l, &r) in left.iter().zip(right) {
        writer.write_sample(quantize(l))?;
        writer.write_sample(quantize(r))?;
    }
    writer.finalize()?;
    Ok(cursor.into_inner())
}

pub fn encode_buffer(buffer: &StereoBuffer) -> Result<Vec<u8>, AppError> {
    encode(&buffer.left, &buffer.right, buffer.sample_rate)
}
