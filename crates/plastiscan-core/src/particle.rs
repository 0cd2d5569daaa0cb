use serde::{Deserialize, Serialize};

use crate::classify::ShapeClass;
use crate::consts::EPSILON;
use crate::frame::Contour;
use crate::texture::TextureStats;

/// Fitted extent of a particle.
///
/// Ellipse-derived fields exist only when an ellipse was actually fit
/// (contours with enough boundary points); shorter contours carry the
/// isotropic fallback, so downstream code cannot read an angle that was
/// never computed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeometryFit {
    Ellipse { major: f64, minor: f64, angle: f64 },
    Isotropic { size: f64 },
}

impl GeometryFit {
    /// Major axis length (isotropic size for the fallback).
    pub fn major_axis(&self) -> f64 {
        match self {
            GeometryFit::Ellipse { major, .. } => *major,
            GeometryFit::Isotropic { size } => *size,
        }
    }

    /// Minor axis length (isotropic size for the fallback).
    pub fn minor_axis(&self) -> f64 {
        match self {
            GeometryFit::Ellipse { minor, .. } => *minor,
            GeometryFit::Isotropic { size } => *size,
        }
    }

    /// Major over minor axis, with an epsilon-floored divisor.
    pub fn aspect_ratio(&self) -> f64 {
        match self {
            GeometryFit::Ellipse { major, minor, .. } => major / (minor + EPSILON),
            GeometryFit::Isotropic { .. } => 1.0,
        }
    }

    /// Ellipse orientation in degrees; absent for the isotropic fallback.
    pub fn angle(&self) -> Option<f64> {
        match self {
            GeometryFit::Ellipse { angle, .. } => Some(*angle),
            GeometryFit::Isotropic { .. } => None,
        }
    }
}

/// One detected blob in one frame. Immutable once constructed; particle
/// lists are rebuilt from scratch every frame and carry no cross-frame
/// identity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Particle {
    /// Closed boundary polygon, in contour-discovery order.
    pub contour: Contour,
    /// Enclosed area in pixels.
    pub area: f64,
    /// Boundary length.
    pub perimeter: f64,
    /// Area-weighted center, (x, y) pixel coordinates.
    pub centroid: (f64, f64),
    pub fit: GeometryFit,
    /// Isoperimetric metric in [0, 1]; 1 is a perfect circle.
    pub circularity: f64,
    /// Area over convex hull area; concave boundaries score below 1.
    pub convexity: f64,
    pub shape: ShapeClass,
    /// Absent when the contour mask selects no pixels.
    pub texture: Option<TextureStats>,
}

impl Particle {
    pub fn aspect_ratio(&self) -> f64 {
        self.fit.aspect_ratio()
    }

    /// Intensity std used by the roughness buckets; 0 without texture.
    pub fn intensity_std(&self) -> f64 {
        self.texture.map(|t| t.std_intensity).unwrap_or(0.0)
    }
}
