mod common;

use common::*;
use imageproc::point::Point;
use shapeid::detection::{contours, features};
use shapeid::{Centroid, ClassifyError};

#[test]
fn centroid_of_rectangle_outline_is_the_exact_center() {
    let edges = rect_edge_map(MAP_SIZE, 81, 41);
    let contour = contours::first_contour(&edges).unwrap();
    let centroid = contours::centroid_of(&contour).unwrap();

    // Outline spans x in [23, 103], y in [43, 83]; center is (63, 63)
    assert_eq!(centroid, Centroid { row: 63, col: 63 });
}

#[test]
fn centroid_of_circle_ring_lands_near_the_center_and_in_bounds() {
    let edges = circle_edge_map(MAP_SIZE, 30.0);
    let contour = contours::first_contour(&edges).unwrap();
    let centroid = contours::centroid_of(&contour).unwrap();

    assert!(centroid.row < MAP_SIZE && centroid.col < MAP_SIZE);
    assert!((centroid.row as i32 - 64).abs() <= 1);
    assert!((centroid.col as i32 - 64).abs() <= 1);
}

#[test]
fn contour_moments_of_a_square_match_the_shoelace_formulas() {
    let points = vec![
        Point::new(0u32, 0u32),
        Point::new(10, 0),
        Point::new(10, 10),
        Point::new(0, 10),
    ];
    let m = contours::contour_moments(&points);

    assert_eq!(m.m00.abs(), 100.0);
    assert_eq!((m.m10 / m.m00).trunc(), 5.0);
    assert_eq!((m.m01 / m.m00).trunc(), 5.0);
}

#[test]
fn collinear_contour_is_a_degenerate_shape_not_a_nan_centroid() {
    let edges = line_edge_map(MAP_SIZE, 40);
    let contour = contours::first_contour(&edges).unwrap();

    assert_eq!(
        contours::centroid_of(&contour),
        Err(ClassifyError::DegenerateShape)
    );
}

#[test]
fn blank_edge_map_has_no_contours() {
    let edges = empty_edge_map(MAP_SIZE);
    assert!(matches!(
        contours::first_contour(&edges),
        Err(ClassifyError::NoContours)
    ));
}

#[test]
fn profile_orders_min_below_max_and_respects_the_divisor() {
    let edges = rect_edge_map(MAP_SIZE, 81, 41);
    let centroid = Centroid { row: 63, col: 63 };
    let count = features::boundary_pixel_count(&edges);
    assert_eq!(count, 240);

    let profile = features::distance_profile(&edges, centroid, count);
    assert!(profile.min_distance >= 0.0);
    assert!(profile.min_distance <= profile.max_distance);
    // Nearest boundary pixel sits straight above the centroid
    assert!((profile.min_distance - 20.0).abs() < 1e-3);
    // Farthest are the corners
    assert!((profile.max_distance - (40.0f32 * 40.0 + 20.0 * 20.0).sqrt()).abs() < 1e-3);

    // Halving the divisor doubles the mean: the divisor is a shared
    // constant, not a per-image recount
    let halved = features::distance_profile(&edges, centroid, count / 2);
    assert!((halved.mean_distance - 2.0 * profile.mean_distance).abs() < 1e-2);
}

#[test]
fn empty_edge_map_keeps_the_sentinel_profile() {
    let edges = empty_edge_map(MAP_SIZE);
    let centroid = Centroid { row: 64, col: 64 };
    let profile = features::distance_profile(&edges, centroid, 0);

    // min stays at the row-dimension sentinel, max at zero
    assert_eq!(profile.min_distance, MAP_SIZE as f32);
    assert_eq!(profile.max_distance, 0.0);
    assert_eq!(profile.mean_distance, 0.0);
    assert!(profile.is_empty());
}

#[test]
fn empty_profile_routes_through_the_coefficient_fallback_without_panicking() {
    let edges = empty_edge_map(MAP_SIZE);
    let centroid = Centroid { row: 64, col: 64 };
    let profile = features::distance_profile(&edges, centroid, 0);

    assert!(features::needs_fallback(&profile));
    let coefficients = features::shape_coefficients(&profile, MAP_SIZE as f32);

    // Only the first coefficient is replaced by the fallback; the secondary
    // ratios keep their IEEE results
    assert_eq!(coefficients.max_over_min, MAP_SIZE as f32);
    assert!(!coefficients.max_over_mean.is_finite() || coefficients.max_over_mean == 0.0);
    assert!(!coefficients.min_over_mean.is_finite());
}

#[test]
fn regular_profile_produces_the_three_plain_ratios() {
    let profile = shapeid::DistanceProfile {
        min_distance: 10.0,
        max_distance: 30.0,
        mean_distance: 20.0,
    };
    assert!(!features::needs_fallback(&profile));

    let coefficients = features::shape_coefficients(&profile, 999.0);
    assert_eq!(coefficients.max_over_min, 3.0);
    assert_eq!(coefficients.max_over_mean, 1.5);
    assert_eq!(coefficients.min_over_mean, 0.5);
}
