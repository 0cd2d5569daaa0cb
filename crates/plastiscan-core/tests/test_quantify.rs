use plastiscan_core::classify::classify_shape;
use plastiscan_core::frame::Point;
use plastiscan_core::particle::{GeometryFit, Particle};
use plastiscan_core::quantify::{quantify, QuantifyConfig};
use plastiscan_core::texture::TextureStats;

fn particle(area: f64, major: f64, minor: f64, circularity: f64, std_intensity: f64) -> Particle {
    let fit = GeometryFit::Ellipse {
        major,
        minor,
        angle: 0.0,
    };
    let shape = classify_shape(circularity, fit.aspect_ratio());
    Particle {
        contour: vec![Point::new(0, 0)],
        area,
        perimeter: 4.0 * area.sqrt(),
        centroid: (0.0, 0.0),
        fit,
        circularity,
        convexity: 1.0,
        shape,
        texture: Some(TextureStats {
            mean_intensity: 100.0,
            std_intensity,
            roughness: std_intensity / 2.0,
        }),
    }
}

#[test]
fn test_quantify_empty_list() {
    let report = quantify(&[], &QuantifyConfig::default());
    assert_eq!(report.count, 0);
    assert_eq!(report.average_size, 0.0);
    assert_eq!(report.median_size, 0.0);
    assert_eq!(report.std_size, 0.0);
    assert_eq!(report.total_area, 0.0);
    assert_eq!(report.percentile_95, 0.0);
    assert_eq!(report.size_distribution.total(), 0);
    assert_eq!(report.roughness_distribution.total(), 0);
    assert!(report.shape_distribution.is_empty());
}

#[test]
fn test_histogram_sums_equal_count() {
    let particles = vec![
        particle(60.0, 10.0, 9.0, 0.9, 5.0),
        particle(150.0, 30.0, 8.0, 0.2, 25.0),
        particle(800.0, 40.0, 35.0, 0.8, 60.0),
        particle(2500.0, 90.0, 50.0, 0.4, 10.0),
        particle(99.0, 12.0, 11.0, 0.75, 49.9),
    ];
    let report = quantify(&particles, &QuantifyConfig::default());
    assert_eq!(report.count, 5);
    assert_eq!(report.size_distribution.total(), 5);
    assert_eq!(report.roughness_distribution.total(), 5);
    assert_eq!(report.shape_distribution.values().sum::<usize>(), 5);
}

#[test]
fn test_size_buckets() {
    let particles = vec![
        particle(99.0, 10.0, 10.0, 0.5, 0.0),   // tiny
        particle(100.0, 10.0, 10.0, 0.5, 0.0),  // small
        particle(499.0, 10.0, 10.0, 0.5, 0.0),  // small
        particle(500.0, 10.0, 10.0, 0.5, 0.0),  // medium
        particle(1999.0, 10.0, 10.0, 0.5, 0.0), // medium
        particle(2000.0, 10.0, 10.0, 0.5, 0.0), // large
    ];
    let report = quantify(&particles, &QuantifyConfig::default());
    let sd = report.size_distribution;
    assert_eq!((sd.tiny, sd.small, sd.medium, sd.large), (1, 2, 2, 1));
}

#[test]
fn test_roughness_buckets() {
    let particles = vec![
        particle(100.0, 10.0, 10.0, 0.5, 19.9), // smooth
        particle(100.0, 10.0, 10.0, 0.5, 20.0), // rough
        particle(100.0, 10.0, 10.0, 0.5, 49.9), // rough
        particle(100.0, 10.0, 10.0, 0.5, 50.0), // weathered
    ];
    let report = quantify(&particles, &QuantifyConfig::default());
    let rd = report.roughness_distribution;
    assert_eq!((rd.smooth, rd.rough, rd.weathered), (1, 2, 1));
}

#[test]
fn test_particle_without_texture_counts_as_smooth() {
    let mut p = particle(100.0, 10.0, 10.0, 0.5, 0.0);
    p.texture = None;
    let report = quantify(&[p], &QuantifyConfig::default());
    assert_eq!(report.roughness_distribution.smooth, 1);
    assert_eq!(report.roughness_distribution.total(), 1);
}

#[test]
fn test_percentile_95_of_identical_areas_is_exact() {
    let particles: Vec<Particle> = (0..20)
        .map(|_| particle(321.0, 20.0, 16.0, 0.6, 5.0))
        .collect();
    let report = quantify(&particles, &QuantifyConfig::default());
    assert_eq!(report.percentile_95, 321.0);
    assert_eq!(report.median_size, 321.0);
    assert_eq!(report.std_size, 0.0);
}

#[test]
fn test_percentile_interpolates_between_order_statistics() {
    // Areas 1..=11: p95 sits at rank 9.5, between 10 and 11.
    let particles: Vec<Particle> = (1..=11)
        .map(|i| particle(i as f64, 10.0, 10.0, 0.5, 0.0))
        .collect();
    let report = quantify(&particles, &QuantifyConfig::default());
    assert!((report.percentile_95 - 10.5).abs() < 1e-9, "{}", report.percentile_95);
}

#[test]
fn test_population_statistics() {
    // Population std of {2, 4}: mean 3, variance 1, std 1 (not sqrt(2)).
    let particles = vec![
        particle(2.0, 10.0, 10.0, 0.5, 0.0),
        particle(4.0, 10.0, 10.0, 0.5, 0.0),
    ];
    let report = quantify(&particles, &QuantifyConfig::default());
    assert!((report.average_size - 3.0).abs() < 1e-9);
    assert!((report.std_size - 1.0).abs() < 1e-9);
    assert!((report.median_size - 3.0).abs() < 1e-9);
    assert_eq!(report.min_size, 2.0);
    assert_eq!(report.max_size, 4.0);
    assert_eq!(report.total_area, 6.0);
}

#[test]
fn test_axis_and_shape_averages() {
    let particles = vec![
        particle(100.0, 20.0, 10.0, 0.9, 0.0),
        particle(100.0, 40.0, 20.0, 0.5, 0.0),
    ];
    let report = quantify(&particles, &QuantifyConfig::default());
    assert!((report.average_length - 30.0).abs() < 1e-9);
    assert!((report.average_width - 15.0).abs() < 1e-9);
    assert!((report.average_aspect_ratio - 2.0).abs() < 1e-3);
    assert!((report.average_circularity - 0.7).abs() < 1e-9);
}

#[test]
fn test_custom_bucket_edges() {
    let config = QuantifyConfig {
        size_bucket_edges: [10.0, 20.0, 30.0],
        roughness_edges: [1.0, 2.0],
    };
    let particles = vec![
        particle(5.0, 10.0, 10.0, 0.5, 0.5),
        particle(25.0, 10.0, 10.0, 0.5, 1.5),
        particle(35.0, 10.0, 10.0, 0.5, 2.5),
    ];
    let report = quantify(&particles, &config);
    assert_eq!(report.size_distribution.tiny, 1);
    assert_eq!(report.size_distribution.medium, 1);
    assert_eq!(report.size_distribution.large, 1);
    assert_eq!(report.roughness_distribution.smooth, 1);
    assert_eq!(report.roughness_distribution.rough, 1);
    assert_eq!(report.roughness_distribution.weathered, 1);
}

#[test]
fn test_report_serializes() {
    let particles = vec![particle(100.0, 20.0, 10.0, 0.9, 5.0)];
    let report = quantify(&particles, &QuantifyConfig::default());
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"spherical\""));
}
