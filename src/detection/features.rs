use image::GrayImage;

use crate::models::{Centroid, DistanceProfile, ShapeCoefficients};

/// Intensity that marks a boundary pixel in an edge image.
pub const BOUNDARY: u8 = 255;

/// How the mean boundary distance is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeanNormalization {
    /// Divide every image's distance sum by the boundary-pixel count of the
    /// *first* image in the batch. This reproduces the legacy behavior and
    /// is the default; the divisor must be computed once before any
    /// per-image profiling.
    #[default]
    FirstImageCount,
    /// Divide each image's distance sum by its own boundary-pixel count.
    PerImageCount,
}

/// Count the boundary pixels of an edge image.
pub fn boundary_pixel_count(edges: &GrayImage) -> u32 {
    edges.pixels().filter(|p| p[0] == BOUNDARY).count() as u32
}

/// Fold every boundary pixel of an edge image into a distance profile
/// relative to the given centroid.
///
/// The minimum starts at the image row-dimension sentinel and the maximum
/// at zero, so an image with no boundary pixels comes back as a detectable
/// degenerate profile rather than an error. `divisor` is the mean
/// normalization constant resolved by the caller (see
/// [`MeanNormalization`]); a zero divisor defines the mean as 0.0, which
/// routes the coefficient stage into its fallback path.
pub fn distance_profile(edges: &GrayImage, centroid: Centroid, divisor: u32) -> DistanceProfile {
    let mut min_distance = edges.height() as f32;
    let mut max_distance = 0.0f32;
    let mut sum = 0.0f32;

    for (col, row, pixel) in edges.enumerate_pixels() {
        if pixel[0] != BOUNDARY {
            continue;
        }
        let dr = row as f32 - centroid.row as f32;
        let dc = col as f32 - centroid.col as f32;
        let dist = (dr * dr + dc * dc).sqrt();

        if dist < min_distance {
            min_distance = dist;
        }
        if dist > max_distance {
            max_distance = dist;
        }
        sum += dist;
    }

    let mean_distance = if divisor == 0 {
        0.0
    } else {
        sum / divisor as f32
    };

    DistanceProfile {
        min_distance,
        max_distance,
        mean_distance,
    }
}

/// True when the profile cannot support the primary max/min ratio and the
/// coefficient computation must take its fallback path.
pub fn needs_fallback(profile: &DistanceProfile) -> bool {
    profile.min_distance == 0.0 || profile.mean_distance == 0.0
}

/// Convert a distance profile into the three dimensionless shape
/// coefficients.
///
/// On the fallback path only the first coefficient is replaced — by the
/// caller-supplied `fallback_max_over_min` (conventionally the image's own
/// row-dimension). The secondary ratios are computed as-is; a zero mean
/// distance then propagates IEEE inf/NaN rather than being clamped, and the
/// classifier treats such values as non-circular.
pub fn shape_coefficients(
    profile: &DistanceProfile,
    fallback_max_over_min: f32,
) -> ShapeCoefficients {
    if needs_fallback(profile) {
        ShapeCoefficients {
            max_over_min: fallback_max_over_min,
            max_over_mean: profile.max_distance / profile.mean_distance,
            min_over_mean: profile.min_distance / profile.mean_distance,
        }
    } else {
        ShapeCoefficients {
            max_over_min: profile.max_distance / profile.min_distance,
            max_over_mean: profile.max_distance / profile.mean_distance,
            min_over_mean: profile.min_distance / profile.mean_distance,
        }
    }
}
