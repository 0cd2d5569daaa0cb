use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Acquisition device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Frame read failure: {0}")]
    FrameRead(String),

    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Segmentation failed: {0}")]
    Segmentation(String),

    #[error("Feature extraction failed: {0}")]
    Extraction(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ScanError>;
