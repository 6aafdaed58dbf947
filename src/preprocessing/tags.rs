//! Channel tag parsing.
//!
//! `[L]...[/L]` and `[R]...[/R]` route their inner text to one side; text
//! outside any tag is spoken on both. Tags do not nest.

use crate::domain::entities::{Channel, PreparedScript, Segment};
use once_cell::sync::Lazy;
use regex::Regex;

static LEFT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[L\](.*?)\[/L\]").unwrap());
static RIGHT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[R\](.*?)\[/R\]").unwrap());

const DELIMITERS: [&str; 4] = ["[L]", "[/L]", "[R]", "[/R]"];

/// Splits `annotated` into ordered segments and the tag-free text for the
/// TTS backend. Never fails.
pub fn parse(annotated: &str) -> PreparedScript {
    PreparedScript {
        clean_text: clean_text(annotated),
        segments: segments(annotated),
    }
}

/// Removes the four channel delimiters and trims the result. Break
/// directives are left in place for the backend.
pub fn clean_text(annotated: &str) -> String {
    let mut text = annotated.to_string();
    for delimiter in DELIMITERS {
        text = text.replace(delimiter, "");
    }
    text.trim().to_string()
}

pub fn segments(annotated: &str) -> Vec<Segment> {
    let mut result = Vec::new();
    let mut cursor = 0;
    // Both tags are searched from the cursor so the earliest span wins and
    // anything overlapping it is rescanned after its end.
    while let Some(segment) = next_tagged(annotated, cursor) {
        push_gap(annotated, cursor..segment.source_range.start, &mut result);
        cursor = segment.source_range.end;
        result.push(segment);
    }
    push_gap(annotated, cursor..annotated.len(), &mut result);
    result
}

fn next_tagged(annotated: &str, from: usize) -> Option<Segment> {
    [(&*LEFT_TAG, Channel::Left), (&*RIGHT_TAG, Channel::Right)]
        .into_iter()
        .filter_map(|(pattern, channel)| {
            let caps = pattern.captures_at(annotated, from)?;
            let (whole, inner) = (caps.get(0)?, caps.get(1)?);
            Some(Segment::new(inner.as_str(), channel, whole.range()))
        })
        .min_by_key(|segment| segment.source_range.start)
}

fn push_gap(annotated: &str, range: std::ops::Range<usize>, out: &mut Vec<Segment>) {
    if range.is_empty() {
        return;
    }
    let text = annotated[range.clone()].trim();
    if !text.is_empty() {
        out.push(Segment::new(text, Channel::Both, range));
    }
}
