use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::ShapeClass;
use crate::consts::{DEFAULT_ROUGHNESS_EDGES, DEFAULT_SIZE_BUCKET_EDGES};
use crate::particle::Particle;

/// Bucket edges for the aggregate distributions.
///
/// The defaults match the original deployment's camera/lens setup; they are
/// tunables, not correctness requirements.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuantifyConfig {
    /// Size edges: tiny/small, small/medium, medium/large (area, pixels).
    #[serde(default = "default_size_edges")]
    pub size_bucket_edges: [f64; 3],
    /// Roughness edges on intensity std: smooth/rough, rough/weathered.
    #[serde(default = "default_roughness_edges")]
    pub roughness_edges: [f64; 2],
}

fn default_size_edges() -> [f64; 3] {
    DEFAULT_SIZE_BUCKET_EDGES
}
fn default_roughness_edges() -> [f64; 2] {
    DEFAULT_ROUGHNESS_EDGES
}

impl Default for QuantifyConfig {
    fn default() -> Self {
        Self {
            size_bucket_edges: DEFAULT_SIZE_BUCKET_EDGES,
            roughness_edges: DEFAULT_ROUGHNESS_EDGES,
        }
    }
}

/// Particle counts per area bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeDistribution {
    pub tiny: usize,
    pub small: usize,
    pub medium: usize,
    pub large: usize,
}

impl SizeDistribution {
    pub fn total(&self) -> usize {
        self.tiny + self.small + self.medium + self.large
    }
}

/// Particle counts per surface-roughness bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoughnessDistribution {
    pub smooth: usize,
    pub rough: usize,
    pub weathered: usize,
}

impl RoughnessDistribution {
    pub fn total(&self) -> usize {
        self.smooth + self.rough + self.weathered
    }
}

/// Summary statistics over one frame's particle list.
///
/// Derived data: recomputed on demand, never persisted. Every distribution's
/// bucket counts sum to `count`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QuantificationReport {
    pub count: usize,
    pub average_size: f64,
    pub median_size: f64,
    pub std_size: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub percentile_95: f64,
    pub average_length: f64,
    pub average_width: f64,
    pub average_aspect_ratio: f64,
    pub average_circularity: f64,
    pub total_area: f64,
    pub size_distribution: SizeDistribution,
    pub shape_distribution: BTreeMap<ShapeClass, usize>,
    pub roughness_distribution: RoughnessDistribution,
}

/// Reduce a particle list into a [`QuantificationReport`].
///
/// Pure, total on the empty list (all numeric fields 0, all distributions
/// empty). Uses population statistics and a linearly interpolated 95th
/// percentile.
pub fn quantify(particles: &[Particle], config: &QuantifyConfig) -> QuantificationReport {
    if particles.is_empty() {
        return QuantificationReport::default();
    }

    let areas: Vec<f64> = particles.iter().map(|p| p.area).collect();
    let (mean_area, std_area) = mean_stddev(&areas);

    let mut sorted_areas = areas.clone();
    sorted_areas.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut size_distribution = SizeDistribution::default();
    let [tiny_edge, small_edge, medium_edge] = config.size_bucket_edges;
    for &a in &areas {
        if a < tiny_edge {
            size_distribution.tiny += 1;
        } else if a < small_edge {
            size_distribution.small += 1;
        } else if a < medium_edge {
            size_distribution.medium += 1;
        } else {
            size_distribution.large += 1;
        }
    }

    let mut shape_distribution = BTreeMap::new();
    for p in particles {
        *shape_distribution.entry(p.shape).or_insert(0) += 1;
    }

    let mut roughness_distribution = RoughnessDistribution::default();
    let [smooth_edge, rough_edge] = config.roughness_edges;
    for p in particles {
        let std = p.intensity_std();
        if std < smooth_edge {
            roughness_distribution.smooth += 1;
        } else if std < rough_edge {
            roughness_distribution.rough += 1;
        } else {
            roughness_distribution.weathered += 1;
        }
    }

    let n = particles.len() as f64;
    QuantificationReport {
        count: particles.len(),
        average_size: mean_area,
        median_size: percentile(&sorted_areas, 50.0),
        std_size: std_area,
        min_size: sorted_areas[0],
        max_size: sorted_areas[sorted_areas.len() - 1],
        percentile_95: percentile(&sorted_areas, 95.0),
        average_length: particles.iter().map(|p| p.fit.major_axis()).sum::<f64>() / n,
        average_width: particles.iter().map(|p| p.fit.minor_axis()).sum::<f64>() / n,
        average_aspect_ratio: particles.iter().map(|p| p.aspect_ratio()).sum::<f64>() / n,
        average_circularity: particles.iter().map(|p| p.circularity).sum::<f64>() / n,
        total_area: areas.iter().sum(),
        size_distribution,
        shape_distribution,
        roughness_distribution,
    }
}

/// Percentile of a sorted sequence with linear interpolation between order
/// statistics (not nearest-rank).
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let weight = rank - lo as f64;
    sorted[lo] * (1.0 - weight) + sorted[hi] * weight
}

/// Population mean and standard deviation.
fn mean_stddev(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    if n == 0.0 {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}
