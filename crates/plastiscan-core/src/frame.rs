use ndarray::{Array2, Array3};

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::error::{Result, ScanError};

/// A single RGB video frame.
/// Pixel data is row-major, shape = (height, width, 3), 8 bits per channel.
#[derive(Clone, Debug)]
pub struct Frame {
    pub data: Array3<u8>,
}

impl Frame {
    pub fn new(data: Array3<u8>) -> Self {
        Self { data }
    }

    /// Build a frame from a flat RGB byte buffer (row-major, 3 bytes per pixel).
    pub fn from_rgb_bytes(height: usize, width: usize, bytes: &[u8]) -> Result<Self> {
        let data = Array3::from_shape_vec((height, width, 3), bytes.to_vec())
            .map_err(|_| ScanError::InvalidDimensions { width, height })?;
        Ok(Self { data })
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Luma reduction to a single grayscale plane (BT.601 weights).
    /// Values are f32 in [0.0, 255.0].
    pub fn to_gray(&self) -> Array2<f32> {
        let (h, w, _) = self.data.dim();
        Array2::from_shape_fn((h, w), |(row, col)| {
            let r = self.data[[row, col, 0]] as f32;
            let g = self.data[[row, col, 1]] as f32;
            let b = self.data[[row, col, 2]] as f32;
            LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b
        })
    }
}

/// An integer boundary point of a contour, in (x, y) pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A closed boundary polygon enclosing one connected foreground region.
pub type Contour = Vec<Point>;
