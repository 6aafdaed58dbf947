use crate::config::WeightParams;
use crate::domain::entities::{Channel, SampleRange, Segment, WeightedSegment};
use crate::preprocessing::weights::weight;

pub fn weigh(segments: &[Segment], params: &WeightParams) -> Vec<WeightedSegment> {
    segments
        .iter()
        .map(|segment| WeightedSegment::new(segment.clone(), weight(&segment.text, params)))
        .collect()
}

/// Carves `[0, total_samples)` into one range per segment, proportional to
/// weight and in segment order.
///
/// The last range always ends at `total_samples`. When the weights sum to
/// zero the first segment takes the whole track on both channels and the
/// rest get empty ranges.
pub fn allocate(segments: &[WeightedSegment], total_samples: usize) -> Vec<SampleRange> {
    let Some(last) = segments.len().checked_sub(1) else {
        return Vec::new();
    };

    let total_weight: f64 = segments.iter().map(|s| usable(s.weight)).sum();
    if !(total_weight.is_finite() && total_weight > 0.0) {
        return segments
            .iter()
            .enumerate()
            .map(|(i, s)| match i {
                0 => SampleRange::new(0, total_samples, Channel::Both),
                _ => SampleRange::new(total_samples, total_samples, s.segment.channel),
            })
            .collect();
    }

    let boundary = |acc: f64| -> usize {
        let sample = (acc / total_weight * total_samples as f64).floor() as usize;
        sample.min(total_samples)
    };

    let mut ranges = Vec::with_capacity(segments.len());
    let mut acc = 0.0;
    let mut start = 0;
    for (i, s) in segments.iter().enumerate() {
        acc += usable(s.weight);
        let end = if i == last { total_samples } else { boundary(acc).max(start) };
        ranges.push(SampleRange::new(start, end, s.segment.channel));
        start = end;
    }
    ranges
}

fn usable(weight: f64) -> f64 {
    if weight.is_finite() { weight.max(0.0) } else { 0.0 }
}
