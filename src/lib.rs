//! Sequential stereo channel synthesis for tagged TTS scripts.
//!
//! A script such as `"[L]hi[/L][R]bye[/R]"` is spoken once by a mono TTS
//! backend; this crate estimates where each segment falls in the returned
//! track and routes it to the left, right or both channels.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod pipeline;
pub mod preprocessing;

pub use config::{SynthConfig, WeightParams};
pub use domain::entities::{Channel, PreparedScript, SampleRange, Segment};
pub use domain::errors::AppError;
pub use pipeline::{prepare, synthesize, synthesize_or_passthrough};
