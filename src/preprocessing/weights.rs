//! Text-only estimate of how long a segment takes to speak.

use crate::config::WeightParams;
use once_cell::sync::Lazy;
use regex::Regex;

// The number is read like a leading-float parse: anything after it up to the
// closing quote is ignored, except that a unit starting with `ms` means
// milliseconds.
static BREAK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<break\s+time="\s*(\d+(?:\.\d*)?|\.\d+)\s*(ms)?[^"]*""#).unwrap()
});

/// Relative speaking weight of `text`. Always `>= 0`.
pub fn weight(text: &str, params: &WeightParams) -> f64 {
    let mut chars = 0usize;
    let mut whitespace = 0usize;
    let mut punctuation = 0usize;
    for c in text.chars() {
        chars += 1;
        if c.is_whitespace() {
            whitespace += 1;
        } else if matches!(c, '.' | ',' | '!' | '?' | ';' | ':') {
            punctuation += 1;
        }
    }

    let raw = chars as f64 * params.char_weight
        + pause_seconds(text) * params.pause_weight_per_second()
        - whitespace as f64 * params.whitespace_discount
        - punctuation as f64 * params.punctuation_discount;

    if raw.is_finite() { raw.max(0.0) } else { 0.0 }
}

/// Sum of all `<break time="..."/>` durations in seconds.
pub fn pause_seconds(text: &str) -> f64 {
    BREAK_TAG
        .captures_iter(text)
        .filter_map(|caps| {
            let value: f64 = caps.get(1)?.as_str().parse().ok()?;
            match caps.get(2).map(|unit| unit.as_str()) {
                Some("ms") => Some(value / 1000.0),
                _ => Some(value),
            }
        })
        .sum()
}
