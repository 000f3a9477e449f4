use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnimationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Frame rate must be at least 1, got {0}")]
    InvalidFrameRate(u32),

    #[error("Playback stopped by user")]
    Interrupted,
}

pub type Result<T> = std::result::Result<T, AnimationError>;
