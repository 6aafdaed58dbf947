//! The two entry points used by the UI/API boundary.
//!
//! [`prepare`] runs before the TTS call; [`synthesize`] runs on the audio
//! the backend returns, with the segments retained from [`prepare`].

use crate::config::SynthConfig;
use crate::domain::entities::{PreparedScript, Segment, StereoBuffer};
use crate::domain::errors::AppError;
use crate::infrastructure::audio::{decode_mono, encode_buffer, resample_track};
use crate::infrastructure::compositor::compose;
use crate::preprocessing::segmenter::{allocate, weigh};
use crate::preprocessing::tags::parse;
use tracing::{debug, warn};

pub fn prepare(annotated: &str) -> PreparedScript {
    let script = parse(annotated);
    debug!(
        segments = script.segments.len(),
        clean_chars = script.clean_text.chars().count(),
        "parsed channel tags"
    );
    script
}

/// Splits a decoded mono track across channels according to `segments`.
pub fn render(
    samples: &[f32],
    sample_rate: u32,
    segments: &[Segment],
    config: &SynthConfig,
) -> Result<StereoBuffer, AppError> {
    let weighted = weigh(segments, &config.weights);
    let ranges = allocate(&weighted, samples.len());

    for (segment, range) in weighted.iter().zip(&ranges) {
        debug!(
            channel = ?range.channel,
            weight = segment.weight,
            start = range.start_sample,
            end = range.end_sample,
            "segment {:?}",
            preview(&segment.segment.text)
        );
    }

    let (left, right) = compose(samples, &ranges)?;
    Ok(StereoBuffer::new(left, right, sample_rate))
}

/// Turns the backend's mono WAV bytes into stereo WAV bytes.
pub fn synthesize(
    mono_wav: &[u8],
    segments: &[Segment],
    config: &SynthConfig,
) -> Result<Vec<u8>, AppError> {
    let mut track = decode_mono(mono_wav)?;
    if let Some(rate) = config.output_sample_rate {
        track = resample_track(track, rate)?;
    }
    let stereo = render(&track.samples, track.sample_rate, segments, config)?;
    encode_buffer(&stereo)
}

/// Like [`synthesize`], but hands back the untouched source bytes when any
/// stereo stage fails.
pub fn synthesize_or_passthrough(
    mono_wav: &[u8],
    segments: &[Segment],
    config: &SynthConfig,
) -> Vec<u8> {
    match synthesize(mono_wav, segments, config) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "stereo rendering failed, returning the original track");
            mono_wav.to_vec()
        }
    }
}

fn preview(text: &str) -> String {
    const LIMIT: usize = 50;
    match text.char_indices().nth(LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
