use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    /// The input could not be read or parsed as a raster image.
    #[error("Image decoding error: {0}")]
    Decode(#[from] image::ImageError),

    /// The frozen model artifact is missing, corrupt or incompatible.
    #[error("Failed to load model from {}: {reason}", path.display())]
    ModelLoad { path: PathBuf, reason: String },

    #[error("Tensor shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, DetectorError>;
