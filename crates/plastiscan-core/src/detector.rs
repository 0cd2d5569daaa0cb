use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classify::classify_shape;
use crate::consts::{
    DEFAULT_BLUR_KERNEL, DEFAULT_CANNY_THRESHOLD_HIGH, DEFAULT_CANNY_THRESHOLD_LOW,
    DEFAULT_HISTORY_CAPACITY, DEFAULT_MAX_PARTICLE_SIZE, DEFAULT_MIN_PARTICLE_SIZE,
};
use crate::frame::{Contour, Frame};
use crate::geometry::{centroid, circularity, contour_area, convexity, fit_geometry, perimeter};
use crate::particle::Particle;
use crate::quantify::QuantifyConfig;
use crate::segment::{segment_frame, SegmentationConfig};
use crate::texture::texture_stats;

/// Full configuration surface of the detection pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Minimum admissible particle area (pixels).
    #[serde(default = "default_min_particle_size")]
    pub min_particle_size: f64,
    /// Maximum admissible particle area (pixels).
    #[serde(default = "default_max_particle_size")]
    pub max_particle_size: f64,
    #[serde(default)]
    pub segmentation: SegmentationConfig,
    #[serde(default)]
    pub quantify: QuantifyConfig,
    /// Smoothing kernel reserved for the edge-based segmentation variant.
    #[serde(default = "default_blur_kernel")]
    pub blur_kernel: (usize, usize),
    /// Hysteresis thresholds reserved for the edge-based segmentation variant.
    #[serde(default = "default_canny_thresholds")]
    pub canny_thresholds: (f32, f32),
    /// Capacity of the per-frame history ring buffer.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_min_particle_size() -> f64 {
    DEFAULT_MIN_PARTICLE_SIZE
}
fn default_max_particle_size() -> f64 {
    DEFAULT_MAX_PARTICLE_SIZE
}
fn default_blur_kernel() -> (usize, usize) {
    DEFAULT_BLUR_KERNEL
}
fn default_canny_thresholds() -> (f32, f32) {
    (DEFAULT_CANNY_THRESHOLD_LOW, DEFAULT_CANNY_THRESHOLD_HIGH)
}
fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_particle_size: DEFAULT_MIN_PARTICLE_SIZE,
            max_particle_size: DEFAULT_MAX_PARTICLE_SIZE,
            segmentation: SegmentationConfig::default(),
            quantify: QuantifyConfig::default(),
            blur_kernel: DEFAULT_BLUR_KERNEL,
            canny_thresholds: (DEFAULT_CANNY_THRESHOLD_LOW, DEFAULT_CANNY_THRESHOLD_HIGH),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Detect particles in a single frame.
///
/// Pipeline: grayscale -> segmentation -> per-contour size filter ->
/// geometry/texture extraction -> shape classification. Particles come back
/// in contour-discovery order.
///
/// Never fails outward: the frame is the unit of containment, so any
/// internal problem is logged and whatever was already assembled (possibly
/// nothing) is returned. Does not touch shared state; publishing results is
/// the caller's job.
pub fn detect_particles(frame: &Frame, config: &DetectorConfig) -> Vec<Particle> {
    if frame.width() == 0 || frame.height() == 0 {
        warn!(
            width = frame.width(),
            height = frame.height(),
            "Skipping degenerate frame"
        );
        return Vec::new();
    }

    let gray = frame.to_gray();
    let contours = segment_frame(&gray, &config.segmentation);

    let mut particles = Vec::new();
    for contour in contours {
        if let Some(p) = extract_particle(&gray, contour, config) {
            particles.push(p);
        }
    }
    particles
}

/// Build one particle record from a candidate contour, or `None` when the
/// contour is filtered out or degenerate.
fn extract_particle(
    gray: &ndarray::Array2<f32>,
    contour: Contour,
    config: &DetectorConfig,
) -> Option<Particle> {
    let area = contour_area(&contour);

    // Size filter first; everything below is wasted work for rejects.
    if area < config.min_particle_size || area > config.max_particle_size {
        return None;
    }

    // Zero zeroth moment: expected fallout of noisy segmentation, skipped
    // silently rather than surfaced as an error.
    let centroid = centroid(&contour)?;

    let perimeter = perimeter(&contour);
    let circularity = circularity(area, perimeter);
    let convexity = convexity(&contour, area);
    let fit = fit_geometry(&contour, area);
    let shape = classify_shape(circularity, fit.aspect_ratio());
    let texture = texture_stats(gray, &contour);

    Some(Particle {
        contour,
        area,
        perimeter,
        centroid,
        fit,
        circularity,
        convexity,
        shape,
        texture,
    })
}
