use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Adaptive binarization with a Gaussian-weighted local mean.
///
/// A pixel is foreground when its value exceeds the Gaussian-weighted mean
/// of its `block_size` x `block_size` neighborhood minus `offset`. A local
/// threshold (rather than one global cutoff) is required because
/// illumination varies across the field of view.
pub fn adaptive_threshold(data: &Array2<f32>, block_size: usize, offset: f32) -> Array2<bool> {
    let block_size = if block_size % 2 == 0 {
        block_size + 1
    } else {
        block_size.max(3)
    };
    let kernel = gaussian_kernel(block_size);
    let row_pass = convolve_rows(data, &kernel);
    let local_mean = convolve_cols(&row_pass, &kernel);

    let (h, w) = data.dim();
    Array2::from_shape_fn((h, w), |(row, col)| {
        data[[row, col]] > local_mean[[row, col]] - offset
    })
}

/// Normalized 1D Gaussian with the conventional size-derived sigma
/// (0.3 * ((size - 1) * 0.5 - 1) + 0.8).
fn gaussian_kernel(size: usize) -> Vec<f32> {
    let sigma = 0.3 * ((size - 1) as f32 * 0.5 - 1.0) + 0.8;
    let radius = size / 2;
    let s2 = 2.0 * sigma * sigma;
    let mut kernel = vec![0.0f32; size];
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }
    for v in &mut kernel {
        *v /= sum;
    }
    kernel
}

fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    let convolve_row = |row: usize| -> Vec<f32> {
        (0..w)
            .map(|col| {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let src_col = (col as isize + ki as isize - radius as isize)
                        .clamp(0, w as isize - 1) as usize;
                    sum += data[[row, src_col]] * kv;
                }
                sum
            })
            .collect()
    };

    let rows: Vec<Vec<f32>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(convolve_row).collect()
    } else {
        (0..h).map(convolve_row).collect()
    };

    collect_rows(rows, h, w)
}

fn convolve_cols(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    let convolve_row = |row: usize| -> Vec<f32> {
        (0..w)
            .map(|col| {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let src_row = (row as isize + ki as isize - radius as isize)
                        .clamp(0, h as isize - 1) as usize;
                    sum += data[[src_row, col]] * kv;
                }
                sum
            })
            .collect()
    };

    let rows: Vec<Vec<f32>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(convolve_row).collect()
    } else {
        (0..h).map(convolve_row).collect()
    };

    collect_rows(rows, h, w)
}

fn collect_rows(rows: Vec<Vec<f32>>, h: usize, w: usize) -> Array2<f32> {
    let mut result = Array2::<f32>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}
