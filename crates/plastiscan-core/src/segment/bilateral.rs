use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Edge-preserving bilateral filter.
///
/// Each output pixel is a weighted average over a `diameter` x `diameter`
/// window; the weight combines a spatial Gaussian (`sigma_space`) with an
/// intensity-difference Gaussian (`sigma_color`), so flat regions are
/// smoothed while strong edges survive. Border pixels clamp to the edge.
pub fn bilateral_filter(
    data: &Array2<f32>,
    diameter: usize,
    sigma_color: f32,
    sigma_space: f32,
) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = (diameter.max(1) - 1) / 2;
    let spatial = spatial_kernel(radius, sigma_space);
    let inv_color = -0.5 / (sigma_color * sigma_color);

    let filter_row = |row: usize| -> Vec<f32> {
        (0..w)
            .map(|col| {
                let center = data[[row, col]];
                let mut sum = 0.0f32;
                let mut weight_sum = 0.0f32;
                for dr in -(radius as isize)..=(radius as isize) {
                    for dc in -(radius as isize)..=(radius as isize) {
                        let src_row = (row as isize + dr).clamp(0, h as isize - 1) as usize;
                        let src_col = (col as isize + dc).clamp(0, w as isize - 1) as usize;
                        let v = data[[src_row, src_col]];
                        let diff = v - center;
                        let sw = spatial[[
                            (dr + radius as isize) as usize,
                            (dc + radius as isize) as usize,
                        ]];
                        let weight = sw * (diff * diff * inv_color).exp();
                        sum += v * weight;
                        weight_sum += weight;
                    }
                }
                sum / weight_sum
            })
            .collect()
    };

    let rows: Vec<Vec<f32>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(filter_row).collect()
    } else {
        (0..h).map(filter_row).collect()
    };

    let mut result = Array2::<f32>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}

fn spatial_kernel(radius: usize, sigma_space: f32) -> Array2<f32> {
    let size = 2 * radius + 1;
    let inv = -0.5 / (sigma_space * sigma_space);
    Array2::from_shape_fn((size, size), |(r, c)| {
        let dr = r as f32 - radius as f32;
        let dc = c as f32 - radius as f32;
        ((dr * dr + dc * dc) * inv).exp()
    })
}
