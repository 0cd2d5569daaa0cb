use std::collections::HashSet;

use ndarray::Array2;

use crate::frame::{Contour, Point};

/// Clockwise 8-neighborhood offsets (dr, dc), starting at West.
const NEIGHBORS: [(i32, i32); 8] = [
    (0, -1),  // W
    (-1, -1), // NW
    (-1, 0),  // N
    (-1, 1),  // NE
    (0, 1),   // E
    (1, 1),   // SE
    (1, 0),   // S
    (1, -1),  // SW
];

/// Extract the outer boundary of every connected foreground region.
///
/// Components are labeled with two-pass union-find (8-connectivity), then
/// each component's external border is walked with Moore neighbor tracing
/// from its topmost-leftmost pixel. Internal (hole) borders are never
/// produced. Contours are returned in row-major discovery order.
pub fn external_contours(mask: &Array2<bool>) -> Vec<Contour> {
    let labels = label_components(mask);
    let (h, w) = mask.dim();

    let mut seen = HashSet::new();
    let mut contours = Vec::new();
    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl == 0 || !seen.insert(lbl) {
                continue;
            }
            contours.push(trace_boundary(&labels, lbl, row, col));
        }
    }
    contours
}

/// Two-pass union-find connected component labeling with 8-connectivity.
/// Returns an array of resolved root labels (0 = background).
fn label_components(mask: &Array2<bool>) -> Array2<u32> {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    if h == 0 || w == 0 {
        return labels;
    }

    let mut next_label: u32 = 1;
    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0; h * w / 2 + 2];

    // Pass 1: assign provisional labels from the already-visited neighbors.
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let mut candidates = [0u32; 4];
            let mut n = 0;
            for (dr, dc) in [(-1i32, -1i32), (-1, 0), (-1, 1), (0, -1)] {
                let nr = row as i32 + dr;
                let nc = col as i32 + dc;
                if nr >= 0 && nc >= 0 && nc < w as i32 {
                    let lbl = labels[[nr as usize, nc as usize]];
                    if lbl > 0 {
                        candidates[n] = lbl;
                        n += 1;
                    }
                }
            }

            if n == 0 {
                if next_label as usize >= parent.len() {
                    parent.resize(parent.len() * 2, 0);
                }
                parent[next_label as usize] = next_label;
                labels[[row, col]] = next_label;
                next_label += 1;
            } else {
                let smallest = candidates[..n].iter().copied().min().unwrap_or(0);
                labels[[row, col]] = smallest;
                for &other in &candidates[..n] {
                    if other != smallest {
                        union(&mut parent, smallest, other);
                    }
                }
            }
        }
    }

    // Flatten parent references.
    for i in 1..next_label as usize {
        parent[i] = find(&parent, i as u32);
    }

    // Pass 2: resolve every pixel to its root.
    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl > 0 {
                labels[[row, col]] = parent[lbl as usize];
            }
        }
    }

    labels
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}

/// Moore neighbor tracing around one component's outer border.
///
/// `(start_row, start_col)` must be the component's topmost-leftmost pixel,
/// so its West neighbor is guaranteed background and serves as the initial
/// backtrack position.
fn trace_boundary(labels: &Array2<u32>, label: u32, start_row: usize, start_col: usize) -> Contour {
    let (h, w) = labels.dim();
    let is_fg = |r: i32, c: i32| -> bool {
        r >= 0 && c >= 0 && r < h as i32 && c < w as i32 && labels[[r as usize, c as usize]] == label
    };

    let start = (start_row as i32, start_col as i32);
    let mut contour = vec![Point::new(start.1, start.0)];

    let mut current = start;
    let mut backtrack = (start.0, start.1 - 1);
    // Terminate on the first repeated (pixel, backtrack) state: one-pixel-wide
    // shapes legitimately revisit pixels, so position alone is not enough.
    let mut seen = HashSet::new();
    seen.insert((current, backtrack));

    loop {
        let entry_dir = direction_of(backtrack.0 - current.0, backtrack.1 - current.1);
        let mut advanced = false;

        for step in 1..=NEIGHBORS.len() {
            let d = (entry_dir + step) % NEIGHBORS.len();
            let (dr, dc) = NEIGHBORS[d];
            let cand = (current.0 + dr, current.1 + dc);
            if is_fg(cand.0, cand.1) {
                let prev_d = (entry_dir + step - 1) % NEIGHBORS.len();
                backtrack = (current.0 + NEIGHBORS[prev_d].0, current.1 + NEIGHBORS[prev_d].1);
                current = cand;
                advanced = true;
                break;
            }
        }

        if !advanced {
            // Isolated single-pixel component.
            break;
        }
        if !seen.insert((current, backtrack)) {
            break;
        }
        contour.push(Point::new(current.1, current.0));
    }

    // The walk closes on the starting pixel; drop the redundant closure point.
    if contour.len() > 1 && contour.last() == contour.first() {
        contour.pop();
    }

    contour
}

fn direction_of(dr: i32, dc: i32) -> usize {
    NEIGHBORS
        .iter()
        .position(|&(r, c)| r == dr && c == dc)
        .unwrap_or(0)
}
