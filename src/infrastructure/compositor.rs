use crate::domain::entities::{Channel, SampleRange};
use crate::domain::errors::AppError;

/// Routes each range of `mono` to its channel with hard panning.
///
/// The unrouted side of a `Left`/`Right` range stays silent. An empty range
/// list duplicates the input to both channels.
pub fn compose(mono: &[f32], ranges: &[SampleRange]) -> Result<(Vec<f32>, Vec<f32>), AppError> {
    if ranges.is_empty() {
        return Ok((mono.to_vec(), mono.to_vec()));
    }
    check_coverage(mono.len(), ranges)?;

    let mut left = vec![0.0; mono.len()];
    let mut right = vec![0.0; mono.len()];
    for range in ranges {
        let span = range.start_sample..range.end_sample;
        if range.channel.feeds_left() {
            left[span.clone()].copy_from_slice(&mono[span.clone()]);
        }
        if range.channel.feeds_right() {
            right[span.clone()].copy_from_slice(&mono[span]);
        }
    }
    Ok((left, right))
}

fn check_coverage(expected: usize, ranges: &[SampleRange]) -> Result<(), AppError> {
    let mut cursor = 0;
    for range in ranges {
        if range.start_sample != cursor || range.end_sample < range.start_sample {
            return Err(AppError::InputMismatch { expected, covered: cursor });
        }
        cursor = range.end_sample;
    }
    if cursor != expected {
        return Err(AppError::InputMismatch { expected, covered: cursor });
    }
    Ok(())
}

/// Constant per-channel gain applied to a whole track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelGains {
    pub left: f32,
    pub right: f32,
}

impl ChannelGains {
    /// Mild left-leaning spread.
    pub fn wide() -> Self {
        ChannelGains { left: 0.7, right: 0.3 }
    }

    /// Full level on `channel`, the other side attenuated to 0.3.
    pub fn focus(channel: Channel) -> Self {
        match channel {
            Channel::Left => ChannelGains { left: 1.0, right: 0.3 },
            Channel::Right => ChannelGains { left: 0.3, right: 1.0 },
            Channel::Both => ChannelGains { left: 1.0, right: 1.0 },
        }
    }

    pub fn name(&self) -> String {
        format!("pan_{:.2}_{:.2}", self.left, self.right)
    }
}

pub fn pan(mono: &[f32], gains: ChannelGains) -> (Vec<f32>, Vec<f32>) {
    let left = mono.iter().map(|&s| s * gains.left).collect();
    let right = mono.iter().map(|&s| s * gains.right).collect();
    (left, right)
}
