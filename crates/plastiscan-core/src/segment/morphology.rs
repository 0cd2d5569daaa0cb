use ndarray::Array2;

/// 3x3 cross structuring element.
const ELEMENT: [(i32, i32); 5] = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)];

/// Morphological closing (dilation followed by erosion).
///
/// Merges nearby fragments of one physical particle into a single blob.
pub fn morphological_closing(mask: &Array2<bool>) -> Array2<bool> {
    let dilated = dilate(mask);
    erode(&dilated)
}

/// Morphological opening (erosion followed by dilation).
///
/// Removes isolated noise specks while preserving larger regions.
pub fn morphological_opening(mask: &Array2<bool>) -> Array2<bool> {
    let eroded = erode(mask);
    dilate(&eroded)
}

/// Binary erosion: a pixel stays true only if every element-covered pixel is
/// true (out-of-bounds treated as false).
fn erode(mask: &Array2<bool>) -> Array2<bool> {
    let (h, w) = mask.dim();
    let mut result = Array2::from_elem((h, w), false);

    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }
            let mut all_true = true;
            for &(dr, dc) in ELEMENT.iter() {
                let nr = row as i32 + dr;
                let nc = col as i32 + dc;
                if nr < 0 || nr >= h as i32 || nc < 0 || nc >= w as i32 {
                    all_true = false;
                    break;
                }
                if !mask[[nr as usize, nc as usize]] {
                    all_true = false;
                    break;
                }
            }
            result[[row, col]] = all_true;
        }
    }

    result
}

/// Binary dilation: a pixel becomes true if any element-covered pixel is true.
fn dilate(mask: &Array2<bool>) -> Array2<bool> {
    let (h, w) = mask.dim();
    let mut result = Array2::from_elem((h, w), false);

    for row in 0..h {
        for col in 0..w {
            let mut any_true = false;
            for &(dr, dc) in ELEMENT.iter() {
                let nr = row as i32 + dr;
                let nc = col as i32 + dc;
                if nr >= 0
                    && nr < h as i32
                    && nc >= 0
                    && nc < w as i32
                    && mask[[nr as usize, nc as usize]]
                {
                    any_true = true;
                    break;
                }
            }
            result[[row, col]] = any_true;
        }
    }

    result
}
