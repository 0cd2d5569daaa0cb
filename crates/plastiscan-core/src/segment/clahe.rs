use ndarray::Array2;

use crate::consts::HISTOGRAM_BINS;

/// Contrast-limited adaptive histogram equalization.
///
/// The image is divided into a `tiles` x `tiles` grid; each tile gets its own
/// clipped-histogram equalization mapping, and every pixel is remapped by
/// bilinear interpolation between the four nearest tile mappings. Input and
/// output intensities are in [0.0, 255.0].
pub fn clahe(data: &Array2<f32>, clip_limit: f32, tiles: usize) -> Array2<f32> {
    let (h, w) = data.dim();
    let tiles = tiles.max(1).min(h.max(1)).min(w.max(1));
    let tile_h = h.div_ceil(tiles);
    let tile_w = w.div_ceil(tiles);

    // Per-tile equalization lookup tables.
    let mut luts = vec![vec![0.0f32; HISTOGRAM_BINS]; tiles * tiles];
    for ty in 0..tiles {
        for tx in 0..tiles {
            let row0 = ty * tile_h;
            let row1 = ((ty + 1) * tile_h).min(h);
            let col0 = tx * tile_w;
            let col1 = ((tx + 1) * tile_w).min(w);
            luts[ty * tiles + tx] = tile_lut(data, row0, row1, col0, col1, clip_limit);
        }
    }

    // Bilinear interpolation between neighboring tile mappings.
    let mut result = Array2::<f32>::zeros((h, w));
    for row in 0..h {
        for col in 0..w {
            let bin = bin_of(data[[row, col]]);

            // Position relative to tile centers.
            let fy = (row as f32 + 0.5) / tile_h as f32 - 0.5;
            let fx = (col as f32 + 0.5) / tile_w as f32 - 0.5;
            let ty0 = fy.floor().clamp(0.0, (tiles - 1) as f32) as usize;
            let tx0 = fx.floor().clamp(0.0, (tiles - 1) as f32) as usize;
            let ty1 = (ty0 + 1).min(tiles - 1);
            let tx1 = (tx0 + 1).min(tiles - 1);
            let wy = (fy - fy.floor()).clamp(0.0, 1.0);
            let wx = (fx - fx.floor()).clamp(0.0, 1.0);

            let top = luts[ty0 * tiles + tx0][bin] * (1.0 - wx) + luts[ty0 * tiles + tx1][bin] * wx;
            let bottom =
                luts[ty1 * tiles + tx0][bin] * (1.0 - wx) + luts[ty1 * tiles + tx1][bin] * wx;
            result[[row, col]] = top * (1.0 - wy) + bottom * wy;
        }
    }
    result
}

fn bin_of(value: f32) -> usize {
    (value.clamp(0.0, 255.0) as usize).min(HISTOGRAM_BINS - 1)
}

/// Build the clipped-histogram equalization LUT for one tile.
fn tile_lut(
    data: &Array2<f32>,
    row0: usize,
    row1: usize,
    col0: usize,
    col1: usize,
    clip_limit: f32,
) -> Vec<f32> {
    let mut histogram = vec![0.0f32; HISTOGRAM_BINS];
    let pixels = ((row1 - row0) * (col1 - col0)).max(1) as f32;

    for row in row0..row1 {
        for col in col0..col1 {
            histogram[bin_of(data[[row, col]])] += 1.0;
        }
    }

    // Clip and redistribute the excess uniformly.
    let ceiling = (clip_limit * pixels / HISTOGRAM_BINS as f32).max(1.0);
    let mut excess = 0.0f32;
    for count in histogram.iter_mut() {
        if *count > ceiling {
            excess += *count - ceiling;
            *count = ceiling;
        }
    }
    let bonus = excess / HISTOGRAM_BINS as f32;
    for count in histogram.iter_mut() {
        *count += bonus;
    }

    // Cumulative mapping back to [0, 255].
    let scale = 255.0 / pixels;
    let mut cdf = 0.0f32;
    let mut lut = vec![0.0f32; HISTOGRAM_BINS];
    for (bin, &count) in histogram.iter().enumerate() {
        cdf += count;
        lut[bin] = (cdf * scale).clamp(0.0, 255.0);
    }
    lut
}
