use plastiscan_core::classify::{classify_shape, ShapeClass};

#[test]
fn test_high_circularity_low_aspect_is_bead() {
    assert_eq!(classify_shape(0.8, 1.1), ShapeClass::Bead);
}

#[test]
fn test_high_circularity_elongated_is_spherical() {
    assert_eq!(classify_shape(0.8, 2.0), ShapeClass::Spherical);
}

#[test]
fn test_low_circularity_very_elongated_is_fiber() {
    assert_eq!(classify_shape(0.3, 4.0), ShapeClass::Fiber);
}

#[test]
fn test_low_circularity_moderately_elongated_is_fragment() {
    assert_eq!(classify_shape(0.3, 2.0), ShapeClass::Fragment);
}

#[test]
fn test_low_circularity_compact_is_film() {
    assert_eq!(classify_shape(0.3, 1.0), ShapeClass::Film);
}

#[test]
fn test_circularity_dominates_elongation() {
    // Even a fiber-grade aspect ratio yields spherical when circularity
    // is above the cutoff: the rules are ordered.
    assert_eq!(classify_shape(0.9, 5.0), ShapeClass::Spherical);
}

#[test]
fn test_boundary_values() {
    // Cutoffs are strict inequalities.
    assert_eq!(classify_shape(0.7, 1.0), ShapeClass::Film);
    assert_eq!(classify_shape(0.5, 3.0), ShapeClass::Fragment);
    assert_eq!(classify_shape(0.5, 1.5), ShapeClass::Film);
}

#[test]
fn test_classifier_is_deterministic() {
    for _ in 0..10 {
        assert_eq!(classify_shape(0.71, 1.29), ShapeClass::Bead);
    }
}

#[test]
fn test_shape_names() {
    assert_eq!(ShapeClass::Bead.as_str(), "bead");
    assert_eq!(ShapeClass::Spherical.to_string(), "spherical");
    assert_eq!(ShapeClass::Fiber.as_str(), "fiber");
    assert_eq!(ShapeClass::Fragment.as_str(), "fragment");
    assert_eq!(ShapeClass::Film.as_str(), "film");
}
