use crate::consts::{ELLIPSE_FIT_MIN_POINTS, EPSILON};
use crate::frame::{Contour, Point};
use crate::particle::GeometryFit;

/// Signed polygon area (shoelace). Positive for counterclockwise vertex
/// order in image coordinates.
pub fn signed_area(contour: &Contour) -> f64 {
    let n = contour.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0f64;
    for i in 0..n {
        let p = contour[i];
        let q = contour[(i + 1) % n];
        sum += p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
    }
    sum / 2.0
}

/// Enclosed area of a closed contour, in pixels.
pub fn contour_area(contour: &Contour) -> f64 {
    signed_area(contour).abs()
}

/// Boundary length of a closed contour.
pub fn perimeter(contour: &Contour) -> f64 {
    let n = contour.len();
    if n < 2 {
        return 0.0;
    }
    let mut total = 0.0f64;
    for i in 0..n {
        let p = contour[i];
        let q = contour[(i + 1) % n];
        let dx = (q.x - p.x) as f64;
        let dy = (q.y - p.y) as f64;
        total += (dx * dx + dy * dy).sqrt();
    }
    total
}

/// Area-weighted centroid from the first polygon moments.
///
/// Returns `None` when the zeroth moment is zero (degenerate contour), the
/// division-by-zero guard required before any centroid use.
pub fn centroid(contour: &Contour) -> Option<(f64, f64)> {
    let a = signed_area(contour);
    if a == 0.0 {
        return None;
    }
    let n = contour.len();
    let mut cx = 0.0f64;
    let mut cy = 0.0f64;
    for i in 0..n {
        let p = contour[i];
        let q = contour[(i + 1) % n];
        let cross = p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
        cx += (p.x as f64 + q.x as f64) * cross;
        cy += (p.y as f64 + q.y as f64) * cross;
    }
    Some((cx / (6.0 * a), cy / (6.0 * a)))
}

/// Isoperimetric circularity: min(4*pi*area / perimeter^2, 1.0).
/// Zero when the perimeter is zero.
pub fn circularity(area: f64, perimeter: f64) -> f64 {
    if perimeter == 0.0 {
        return 0.0;
    }
    (4.0 * std::f64::consts::PI * area / (perimeter * perimeter)).min(1.0)
}

/// Convexity: contour area over convex hull area (epsilon-guarded).
pub fn convexity(contour: &Contour, area: f64) -> f64 {
    let hull = convex_hull(contour);
    area / (contour_area(&hull) + EPSILON)
}

/// Andrew monotone-chain convex hull. Returns vertices in counterclockwise
/// order; degenerate inputs (< 3 distinct points) are returned as-is.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts: Vec<Point> = points.to_vec();
    pts.sort_by(|a, b| (a.x, a.y).cmp(&(b.x, b.y)));
    pts.dedup();
    let n = pts.len();
    if n < 3 {
        return pts;
    }

    let cross = |o: Point, a: Point, b: Point| -> i64 {
        (a.x as i64 - o.x as i64) * (b.y as i64 - o.y as i64)
            - (a.y as i64 - o.y as i64) * (b.x as i64 - o.x as i64)
    };

    let mut hull: Vec<Point> = Vec::with_capacity(2 * n);
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev() {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Fit the particle's extent from its boundary points.
///
/// With at least [`ELLIPSE_FIT_MIN_POINTS`] points, a least-squares ellipse
/// is derived from the second central moments of the boundary scatter:
/// the principal axes of the point covariance give orientation and the
/// full axis lengths (2*sqrt(2*lambda) per eigenvalue, the extent of an
/// ellipse whose boundary has that variance). Shorter contours fall back
/// to the isotropic sqrt(area) estimate.
pub fn fit_geometry(contour: &Contour, area: f64) -> GeometryFit {
    if contour.len() < ELLIPSE_FIT_MIN_POINTS {
        return GeometryFit::Isotropic { size: area.sqrt() };
    }

    let n = contour.len() as f64;
    let mean_x: f64 = contour.iter().map(|p| p.x as f64).sum::<f64>() / n;
    let mean_y: f64 = contour.iter().map(|p| p.y as f64).sum::<f64>() / n;

    let mut sxx = 0.0f64;
    let mut syy = 0.0f64;
    let mut sxy = 0.0f64;
    for p in contour {
        let dx = p.x as f64 - mean_x;
        let dy = p.y as f64 - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    sxx /= n;
    syy /= n;
    sxy /= n;

    // Eigenvalues of the 2x2 covariance matrix.
    let trace_half = (sxx + syy) / 2.0;
    let det_term = (((sxx - syy) / 2.0).powi(2) + sxy * sxy).sqrt();
    let lambda_major = (trace_half + det_term).max(0.0);
    let lambda_minor = (trace_half - det_term).max(0.0);

    let major = 2.0 * (2.0 * lambda_major).sqrt();
    let minor = 2.0 * (2.0 * lambda_minor).sqrt();

    // Orientation of the major principal axis, degrees in [0, 180).
    let mut angle = 0.5 * (2.0 * sxy).atan2(sxx - syy).to_degrees();
    if angle < 0.0 {
        angle += 180.0;
    }

    GeometryFit::Ellipse {
        major,
        minor,
        angle,
    }
}
