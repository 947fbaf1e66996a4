use image::GrayImage;
use imageproc::contours::{find_contours, Contour};
use imageproc::point::Point;

use crate::error::ClassifyError;
use crate::models::Centroid;

/// Raw polygon moments of an ordered contour: zeroth moment (signed area)
/// and first moments (coordinate-weighted sums).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourMoments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

/// Trace the boundary contours of a binary edge image and return the first
/// one found. When several disjoint contours exist there is no merging and
/// no pick-by-area: first found wins (single-shape assumption).
pub fn first_contour(edges: &GrayImage) -> Result<Contour<u32>, ClassifyError> {
    let mut contours = find_contours::<u32>(edges);
    if contours.is_empty() {
        return Err(ClassifyError::NoContours);
    }
    Ok(contours.swap_remove(0))
}

/// Compute polygon (shoelace) moments over an ordered contour.
///
/// Contour points are integer pixel coordinates, so the cross products are
/// exact in f64; a collinear or sub-triangle contour yields an exact zero
/// area rather than a rounding artifact.
pub fn contour_moments(points: &[Point<u32>]) -> ContourMoments {
    let mut m00 = 0.0f64;
    let mut m10 = 0.0f64;
    let mut m01 = 0.0f64;

    let n = points.len();
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        let (x0, y0) = (p.x as f64, p.y as f64);
        let (x1, y1) = (q.x as f64, q.y as f64);

        let cross = x0 * y1 - x1 * y0;
        m00 += cross;
        m10 += (x0 + x1) * cross;
        m01 += (y0 + y1) * cross;
    }

    ContourMoments {
        m00: m00 / 2.0,
        m10: m10 / 6.0,
        m01: m01 / 6.0,
    }
}

/// Locate the centroid of a contour from its moments, truncated to integer
/// pixel coordinates.
///
/// A zero zeroth moment means the centroid division is undefined; that is
/// surfaced as [`ClassifyError::DegenerateShape`] instead of being allowed
/// to propagate as NaN coordinates.
pub fn centroid_of(contour: &Contour<u32>) -> Result<Centroid, ClassifyError> {
    let m = contour_moments(&contour.points);
    if m.m00 == 0.0 {
        return Err(ClassifyError::DegenerateShape);
    }

    let col = (m.m10 / m.m00).trunc();
    let row = (m.m01 / m.m00).trunc();
    Ok(Centroid {
        row: row as u32,
        col: col as u32,
    })
}
