pub mod segmenter;
pub mod tags;
pub mod weights;
