pub mod bilateral;
pub mod clahe;
pub mod contour;
pub mod morphology;
pub mod threshold;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ADAPTIVE_BLOCK_SIZE, DEFAULT_ADAPTIVE_OFFSET, DEFAULT_BILATERAL_DIAMETER,
    DEFAULT_BILATERAL_SIGMA_COLOR, DEFAULT_BILATERAL_SIGMA_SPACE, DEFAULT_CLAHE_CLIP_LIMIT,
    DEFAULT_CLAHE_TILES,
};
use crate::frame::Contour;

use bilateral::bilateral_filter;
use clahe::clahe;
use contour::external_contours;
use morphology::{morphological_closing, morphological_opening};
use threshold::adaptive_threshold;

/// Configuration for the segmentation stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Bilateral filter neighborhood diameter.
    #[serde(default = "default_bilateral_diameter")]
    pub bilateral_diameter: usize,
    /// Bilateral filter intensity sigma.
    #[serde(default = "default_bilateral_sigma_color")]
    pub bilateral_sigma_color: f32,
    /// Bilateral filter spatial sigma.
    #[serde(default = "default_bilateral_sigma_space")]
    pub bilateral_sigma_space: f32,
    /// CLAHE clip limit.
    #[serde(default = "default_clahe_clip_limit")]
    pub clahe_clip_limit: f32,
    /// CLAHE tile grid side length.
    #[serde(default = "default_clahe_tiles")]
    pub clahe_tiles: usize,
    /// Adaptive threshold neighborhood side length (odd).
    #[serde(default = "default_adaptive_block_size")]
    pub adaptive_block_size: usize,
    /// Adaptive threshold offset subtracted from the local mean.
    #[serde(default = "default_adaptive_offset")]
    pub adaptive_offset: f32,
}

fn default_bilateral_diameter() -> usize {
    DEFAULT_BILATERAL_DIAMETER
}
fn default_bilateral_sigma_color() -> f32 {
    DEFAULT_BILATERAL_SIGMA_COLOR
}
fn default_bilateral_sigma_space() -> f32 {
    DEFAULT_BILATERAL_SIGMA_SPACE
}
fn default_clahe_clip_limit() -> f32 {
    DEFAULT_CLAHE_CLIP_LIMIT
}
fn default_clahe_tiles() -> usize {
    DEFAULT_CLAHE_TILES
}
fn default_adaptive_block_size() -> usize {
    DEFAULT_ADAPTIVE_BLOCK_SIZE
}
fn default_adaptive_offset() -> f32 {
    DEFAULT_ADAPTIVE_OFFSET
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            bilateral_diameter: DEFAULT_BILATERAL_DIAMETER,
            bilateral_sigma_color: DEFAULT_BILATERAL_SIGMA_COLOR,
            bilateral_sigma_space: DEFAULT_BILATERAL_SIGMA_SPACE,
            clahe_clip_limit: DEFAULT_CLAHE_CLIP_LIMIT,
            clahe_tiles: DEFAULT_CLAHE_TILES,
            adaptive_block_size: DEFAULT_ADAPTIVE_BLOCK_SIZE,
            adaptive_offset: DEFAULT_ADAPTIVE_OFFSET,
        }
    }
}

/// Segment a grayscale frame into candidate blob contours.
///
/// Pipeline: bilateral smoothing -> local contrast enhancement (CLAHE) ->
/// adaptive Gaussian threshold -> morphological closing then opening ->
/// external contour extraction.
///
/// Contours are returned in discovery order (row-major by topmost-leftmost
/// boundary pixel), carrying no metadata yet.
pub fn segment_frame(gray: &Array2<f32>, config: &SegmentationConfig) -> Vec<Contour> {
    let (h, w) = gray.dim();
    if h == 0 || w == 0 {
        return Vec::new();
    }

    // Step 1: Edge-preserving noise smoothing.
    let smoothed = bilateral_filter(
        gray,
        config.bilateral_diameter,
        config.bilateral_sigma_color,
        config.bilateral_sigma_space,
    );

    // Step 2: Local contrast enhancement against uneven illumination.
    let enhanced = clahe(&smoothed, config.clahe_clip_limit, config.clahe_tiles);

    // Step 3: Per-pixel Gaussian-weighted adaptive threshold.
    let mask = adaptive_threshold(&enhanced, config.adaptive_block_size, config.adaptive_offset);

    // Step 4: Closing merges nearby fragments, opening removes noise specks.
    let closed = morphological_closing(&mask);
    let cleaned = morphological_opening(&closed);

    // Step 5: Outer blob boundaries only.
    external_contours(&cleaned)
}
