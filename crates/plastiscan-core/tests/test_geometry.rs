use approx::assert_relative_eq;
use plastiscan_core::frame::{Contour, Point};
use plastiscan_core::geometry::{
    centroid, circularity, contour_area, convex_hull, convexity, fit_geometry, perimeter,
};
use plastiscan_core::particle::GeometryFit;

/// Boundary of a w x h pixel block, clockwise from the top-left corner.
fn rect_contour(w: i32, h: i32) -> Contour {
    let mut pts = Vec::new();
    for x in 0..w {
        pts.push(Point::new(x, 0));
    }
    for y in 1..h {
        pts.push(Point::new(w - 1, y));
    }
    for x in (0..w - 1).rev() {
        pts.push(Point::new(x, h - 1));
    }
    for y in (1..h - 1).rev() {
        pts.push(Point::new(0, y));
    }
    pts
}

#[test]
fn test_rectangle_area_and_perimeter() {
    let c = rect_contour(11, 6);
    assert_eq!(contour_area(&c), 50.0);
    assert_eq!(perimeter(&c), 30.0);
}

#[test]
fn test_centroid_of_rectangle_is_center() {
    let c = rect_contour(11, 11);
    let (cx, cy) = centroid(&c).unwrap();
    assert_relative_eq!(cx, 5.0, epsilon = 1e-9);
    assert_relative_eq!(cy, 5.0, epsilon = 1e-9);
}

#[test]
fn test_degenerate_contour_has_no_centroid() {
    // Collinear points: zero enclosed area, centroid must be refused.
    let line = vec![Point::new(0, 0), Point::new(5, 0), Point::new(2, 0)];
    assert!(centroid(&line).is_none());
}

#[test]
fn test_circularity_zero_perimeter() {
    assert_eq!(circularity(10.0, 0.0), 0.0);
}

#[test]
fn test_circularity_range() {
    // A square: 4*pi*s^2 / (4s)^2 = pi/4 ~ 0.785.
    let c = rect_contour(11, 11);
    let circ = circularity(contour_area(&c), perimeter(&c));
    assert!(circ > 0.7 && circ <= 1.0, "got {circ}");

    // Overshooting inputs clamp to 1.0.
    assert_eq!(circularity(1000.0, 1.0), 1.0);
}

#[test]
fn test_convexity_of_convex_shape_near_one() {
    let c = rect_contour(11, 11);
    let v = convexity(&c, contour_area(&c));
    assert!((v - 1.0).abs() < 0.01, "got {v}");
}

#[test]
fn test_convexity_below_one_for_concave_shape() {
    // An L-shape: hull area exceeds the region area.
    let l_shape = vec![
        Point::new(0, 0),
        Point::new(10, 0),
        Point::new(10, 3),
        Point::new(3, 3),
        Point::new(3, 10),
        Point::new(0, 10),
    ];
    let area = contour_area(&l_shape);
    let v = convexity(&l_shape, area);
    assert!(v < 0.9, "got {v}");
    assert!(v > 0.0);
}

#[test]
fn test_convex_hull_of_square_with_interior_point() {
    let pts = vec![
        Point::new(0, 0),
        Point::new(10, 0),
        Point::new(10, 10),
        Point::new(0, 10),
        Point::new(5, 5),
    ];
    let hull = convex_hull(&pts);
    assert_eq!(hull.len(), 4);
    assert!(!hull.contains(&Point::new(5, 5)));
    assert_eq!(contour_area(&hull), 100.0);
}

#[test]
fn test_short_contour_uses_isotropic_fallback() {
    let tri = vec![Point::new(0, 0), Point::new(10, 0), Point::new(0, 10)];
    let fit = fit_geometry(&tri, 50.0);
    match fit {
        GeometryFit::Isotropic { size } => assert!((size - 50.0f64.sqrt()).abs() < 1e-9),
        GeometryFit::Ellipse { .. } => panic!("expected isotropic fallback"),
    }
    assert_eq!(fit.aspect_ratio(), 1.0);
    assert!(fit.angle().is_none());
    assert_eq!(fit.major_axis(), fit.minor_axis());
}

#[test]
fn test_elongated_contour_fits_elongated_ellipse() {
    let c = rect_contour(41, 5);
    let fit = fit_geometry(&c, contour_area(&c));
    match fit {
        GeometryFit::Ellipse {
            major,
            minor,
            angle,
        } => {
            assert!(major > minor);
            assert!(fit.aspect_ratio() > 3.0, "aspect {}", fit.aspect_ratio());
            // Long axis lies along x.
            assert!(angle < 5.0 || angle > 175.0, "angle {angle}");
            assert!(minor > 0.0);
        }
        GeometryFit::Isotropic { .. } => panic!("expected ellipse fit"),
    }
    assert!(fit.angle().is_some());
}

#[test]
fn test_square_contour_fits_near_isotropic_ellipse() {
    let c = rect_contour(21, 21);
    let fit = fit_geometry(&c, contour_area(&c));
    let aspect = fit.aspect_ratio();
    assert!((aspect - 1.0).abs() < 0.05, "aspect {aspect}");
}

#[test]
fn test_vertical_bar_orientation() {
    let c = rect_contour(5, 41);
    let fit = fit_geometry(&c, contour_area(&c));
    let angle = fit.angle().unwrap();
    assert!((angle - 90.0).abs() < 5.0, "angle {angle}");
}
