mod common;

use common::*;
use shapeid::detection::classifier::{
    classify, MAX_OVER_MEAN_CIRCLE_LIMIT, MAX_OVER_MIN_CIRCLE_LIMIT, MIN_OVER_MEAN_CIRCLE_LIMIT,
};
use shapeid::detection::features::MeanNormalization;
use shapeid::{ShapeCoefficients, ShapeLabel, ShapeClassifier};

fn coefficients(max_over_min: f32, max_over_mean: f32, min_over_mean: f32) -> ShapeCoefficients {
    ShapeCoefficients {
        max_over_min,
        max_over_mean,
        min_over_mean,
    }
}

#[test]
fn thresholds_keep_their_fixed_values() {
    assert_eq!(MAX_OVER_MIN_CIRCLE_LIMIT, 1.4);
    assert_eq!(MAX_OVER_MEAN_CIRCLE_LIMIT, 1.51);
    assert_eq!(MIN_OVER_MEAN_CIRCLE_LIMIT, 0.53);
}

#[test]
fn tight_max_over_min_is_a_circle() {
    assert_eq!(classify(&coefficients(1.05, 2.0, 1.9)), ShapeLabel::Circle);
}

#[test]
fn borderline_spread_with_uniform_radius_is_still_a_circle() {
    // Primary ratio fails but both secondary ratios indicate near-uniform radius
    assert_eq!(classify(&coefficients(1.45, 1.50, 0.52)), ShapeLabel::Circle);
}

#[test]
fn wide_spread_is_a_rectangle() {
    assert_eq!(classify(&coefficients(2.24, 1.34, 0.60)), ShapeLabel::Rectangle);
}

#[test]
fn secondary_rule_needs_both_ratios_under_their_limits() {
    assert_eq!(classify(&coefficients(1.45, 1.60, 0.52)), ShapeLabel::Rectangle);
    assert_eq!(classify(&coefficients(1.45, 1.50, 0.54)), ShapeLabel::Rectangle);
}

#[test]
fn non_finite_coefficients_never_classify_as_circle() {
    let nan = coefficients(f32::NAN, f32::NAN, f32::NAN);
    assert_eq!(classify(&nan), ShapeLabel::Rectangle);

    let inf = coefficients(f32::INFINITY, f32::INFINITY, f32::INFINITY);
    assert_eq!(classify(&inf), ShapeLabel::Rectangle);
}

#[test]
fn classification_is_idempotent() {
    let c = coefficients(1.2, 1.1, 0.9);
    let first = classify(&c);
    for _ in 0..10 {
        assert_eq!(classify(&c), first);
    }
}

#[test]
fn discretized_circle_classifies_as_circle() {
    let edges = circle_edge_map(MAP_SIZE, 30.0);
    let classifier = ShapeClassifier::new();
    let results = classifier.classify_edges(&[edges]);

    let shape = results[0].as_ref().unwrap();
    // Boundary points of a discretized circle are near-equidistant from
    // the centroid
    assert!(shape.coefficients.max_over_min < 1.4);
    assert_eq!(shape.label, ShapeLabel::Circle);
    assert!(!shape.degenerate);
}

#[test]
fn two_to_one_rectangle_classifies_as_rectangle() {
    let edges = rect_edge_map(MAP_SIZE, 81, 41);
    let classifier = ShapeClassifier::new();
    let results = classifier.classify_edges(&[edges]);

    let shape = results[0].as_ref().unwrap();
    assert!(shape.coefficients.max_over_min > 1.4);
    assert_eq!(shape.label, ShapeLabel::Rectangle);
}

#[test]
fn batch_keeps_input_order_and_reports_degenerates_per_item() {
    let batch = vec![
        rect_edge_map(MAP_SIZE, 81, 41),
        empty_edge_map(MAP_SIZE),
        circle_edge_map(MAP_SIZE, 30.0),
    ];
    let classifier = ShapeClassifier::new();
    let results = classifier.classify_edges(&batch);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().label, ShapeLabel::Rectangle);
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap().label, ShapeLabel::Circle);
}

#[test]
fn full_run_preprocesses_and_emits_one_outcome_per_image() {
    let classifier = ShapeClassifier::new();
    let images = vec![
        filled_circle_image(MAP_SIZE, 40.0),
        filled_rect_image(MAP_SIZE, 90, 50),
    ];

    // Edge maps keep the source dimensions
    let edges = classifier.preprocess(&images[0]);
    assert_eq!(edges.dimensions(), (MAP_SIZE, MAP_SIZE));

    let results = classifier.run(&images);
    assert_eq!(results.len(), 2);
}

#[test]
fn per_image_normalization_matches_on_single_image_batches() {
    let edges = rect_edge_map(MAP_SIZE, 81, 41);

    let legacy = ShapeClassifier::new();
    let corrected = ShapeClassifier::new().with_normalization(MeanNormalization::PerImageCount);

    // With one image the first image *is* the current image, so the quirk
    // and its correction agree
    let a = legacy.classify_edges(std::slice::from_ref(&edges));
    let b = corrected.classify_edges(&[edges]);
    assert_eq!(
        a[0].as_ref().unwrap().profile.mean_distance,
        b[0].as_ref().unwrap().profile.mean_distance
    );
}

#[test]
fn legacy_normalization_divides_by_the_first_images_count() {
    // Second image profiled against the first image's boundary count
    let batch = vec![
        rect_edge_map(MAP_SIZE, 81, 41),
        rect_edge_map(MAP_SIZE, 41, 81),
    ];
    let legacy = ShapeClassifier::new().classify_edges(&batch);
    let corrected = ShapeClassifier::new()
        .with_normalization(MeanNormalization::PerImageCount)
        .classify_edges(&batch);

    // Both rectangles have the same 240-pixel boundary here, so the two
    // normalizations must agree; the quirk only shows up when counts differ
    assert_eq!(
        legacy[1].as_ref().unwrap().profile.mean_distance,
        corrected[1].as_ref().unwrap().profile.mean_distance
    );

    // Against a first image with half the boundary pixels the legacy mean
    // doubles
    let small_first = vec![rect_edge_map(MAP_SIZE, 41, 21), rect_edge_map(MAP_SIZE, 81, 41)];
    let skewed = ShapeClassifier::new().classify_edges(&small_first);
    let own = corrected[1].as_ref().unwrap().profile.mean_distance;
    let against_small = skewed[1].as_ref().unwrap().profile.mean_distance;
    assert!((against_small - 2.0 * own).abs() < 1e-2);
}
