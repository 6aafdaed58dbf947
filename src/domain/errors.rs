use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("WAV encoding error: {0}")]
    Wav(#[from] hound::Error),
    #[error("Failed to decode source audio: {0}")]
    Decode(String),
    #[error("Resampling error: {0}")]
    Resample(#[from] dasp_rs::AudioError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Segment list error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Sample ranges cover {covered} samples but the mono buffer holds {expected}")]
    InputMismatch { expected: usize, covered: usize },
    #[error("Channel length mismatch: left has {left} samples, right has {right}")]
    ChannelLengthMismatch { left: usize, right: usize },
}
