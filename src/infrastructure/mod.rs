pub mod audio;
pub mod compositor;
