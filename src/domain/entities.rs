use crate::domain::errors::AppError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Output routing for one segment of the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Left,
    Right,
    Both,
}

impl Channel {
    pub fn feeds_left(self) -> bool {
        matches!(self, Channel::Left | Channel::Both)
    }

    pub fn feeds_right(self) -> bool {
        matches!(self, Channel::Right | Channel::Both)
    }
}

/// A contiguous slice of the annotated script with its tags stripped.
///
/// `source_range` holds byte offsets into the annotated text and is only
/// used for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub channel: Channel,
    pub source_range: Range<usize>,
}

impl Segment {
    pub fn new(text: impl Into<String>, channel: Channel, source_range: Range<usize>) -> Self {
        Segment {
            text: text.into(),
            channel,
            source_range,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSegment {
    pub segment: Segment,
    pub weight: f64,
}

impl WeightedSegment {
    pub fn new(segment: Segment, weight: f64) -> Self {
        WeightedSegment { segment, weight }
    }
}

/// Half-open interval `[start_sample, end_sample)` routed to `channel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRange {
    pub start_sample: usize,
    pub end_sample: usize,
    pub channel: Channel,
}

impl SampleRange {
    pub fn new(start_sample: usize, end_sample: usize, channel: Channel) -> Self {
        SampleRange {
            start_sample,
            end_sample,
            channel,
        }
    }

    pub fn len(&self) -> usize {
        self.end_sample.saturating_sub(self.start_sample)
    }

    pub fn is_empty(&self) -> bool {
        self.start_sample == self.end_sample
    }
}

/// Result of parsing a script: the text handed to the TTS backend and the
/// segments retained until its audio comes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedScript {
    pub clean_text: String,
    pub segments: Vec<Segment>,
}

impl PreparedScript {
    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, Clone)]
pub struct MonoTrack {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl MonoTrack {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        MonoTrack { samples, sample_rate }
    }
}

#[derive(Debug, Clone)]
pub struct StereoBuffer {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
    pub sample_rate: u32,
}

impl StereoBuffer {
    pub fn new(left: Vec<f32>, right: Vec<f32>, sample_rate: u32) -> Self {
        StereoBuffer { left, right, sample_rate }
    }

    /// Number of frames, taken from the left channel.
    pub fn frames(&self) -> usize {
        self.left.len()
    }
}
