use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::frame::Contour;

/// Grayscale statistics over the pixels inside a contour mask.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TextureStats {
    pub mean_intensity: f64,
    pub std_intensity: f64,
    /// Std of the first difference of interior intensities; high values
    /// indicate a weathered, irregular surface.
    pub roughness: f64,
}

/// Compute texture statistics over the grayscale pixels covered by the
/// contour (boundary inclusive).
///
/// Returns `None` when the mask selects no pixels. All statistics are
/// population statistics.
pub fn texture_stats(gray: &Array2<f32>, contour: &Contour) -> Option<TextureStats> {
    let values = mask_intensities(gray, contour);
    if values.is_empty() {
        return None;
    }

    let (mean, std) = mean_stddev(&values);
    let roughness = if values.len() >= 2 {
        let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
        mean_stddev(&diffs).1
    } else {
        0.0
    };

    Some(TextureStats {
        mean_intensity: mean,
        std_intensity: std,
        roughness,
    })
}

/// Collect intensities of all pixels inside the contour, row-major.
///
/// Membership is an even-odd ray cast against the polygon edges, with
/// boundary pixels always included.
fn mask_intensities(gray: &Array2<f32>, contour: &Contour) -> Vec<f64> {
    let (h, w) = gray.dim();
    if contour.is_empty() {
        return Vec::new();
    }

    let min_x = contour.iter().map(|p| p.x).min().unwrap_or(0).max(0);
    let max_x = contour.iter().map(|p| p.x).max().unwrap_or(0).min(w as i32 - 1);
    let min_y = contour.iter().map(|p| p.y).min().unwrap_or(0).max(0);
    let max_y = contour.iter().map(|p| p.y).max().unwrap_or(0).min(h as i32 - 1);

    let mut values = Vec::new();
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if on_boundary(contour, x, y) || inside_polygon(contour, x as f64, y as f64) {
                values.push(gray[[y as usize, x as usize]] as f64);
            }
        }
    }
    values
}

fn on_boundary(contour: &Contour, x: i32, y: i32) -> bool {
    contour.iter().any(|p| p.x == x && p.y == y)
}

/// Even-odd point-in-polygon test against the closed contour.
fn inside_polygon(contour: &Contour, x: f64, y: f64) -> bool {
    let n = contour.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (contour[i].x as f64, contour[i].y as f64);
        let (xj, yj) = (contour[j].x as f64, contour[j].y as f64);
        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn mean_stddev(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    if n == 0.0 {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}
