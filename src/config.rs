//! Tunable parameters for the stereo pipeline, loaded from TOML.
//!
//! ```toml
//! output_sample_rate = 44100
//!
//! [weights]
//! char_weight = 5.0
//! whitespace_discount = 1.5
//! punctuation_discount = 0.5
//! avg_chars_per_second = 10.0
//! ```

use crate::domain::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Constants of the text-to-duration heuristic.
///
/// With the defaults a one-second pause weighs `5.0 * 10.0 = 50` units, the
/// same as ten ordinary characters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightParams {
    /// Base weight of every character.
    pub char_weight: f64,
    /// Subtracted once per whitespace character.
    pub whitespace_discount: f64,
    /// Subtracted once per `. , ! ? ; :`.
    pub punctuation_discount: f64,
    /// Speaking rate used to convert `<break>` seconds into characters.
    pub avg_chars_per_second: f64,
}

impl Default for WeightParams {
    fn default() -> Self {
        WeightParams {
            char_weight: 5.0,
            whitespace_discount: 1.5,
            punctuation_discount: 0.5,
            avg_chars_per_second: 10.0,
        }
    }
}

impl WeightParams {
    /// Weight contributed by one second of pause.
    pub fn pause_weight_per_second(&self) -> f64 {
        self.char_weight * self.avg_chars_per_second
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    pub weights: WeightParams,
    /// Resample the decoded track before compositing. `None` keeps the
    /// source rate.
    pub output_sample_rate: Option<u32>,
}

impl SynthConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}
