use serde::{Deserialize, Serialize};

/// Discrete particle shape category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeClass {
    Bead,
    Spherical,
    Fiber,
    Fragment,
    Film,
}

impl ShapeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeClass::Bead => "bead",
            ShapeClass::Spherical => "spherical",
            ShapeClass::Fiber => "fiber",
            ShapeClass::Fragment => "fragment",
            ShapeClass::Film => "film",
        }
    }
}

impl std::fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a particle from its circularity and aspect ratio.
///
/// The rules are evaluated in order, first match wins: circularity dominates
/// elongation, then the aspect-ratio cutoffs are checked from most to least
/// elongated.
pub fn classify_shape(circularity: f64, aspect_ratio: f64) -> ShapeClass {
    if circularity > 0.7 {
        if aspect_ratio < 1.3 {
            ShapeClass::Bead
        } else {
            ShapeClass::Spherical
        }
    } else if aspect_ratio > 3.0 {
        ShapeClass::Fiber
    } else if aspect_ratio > 1.5 {
        ShapeClass::Fragment
    } else {
        ShapeClass::Film
    }
}
