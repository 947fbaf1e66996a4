use crate::models::{ShapeCoefficients, ShapeLabel};

/// A shape whose max/min distance ratio stays under this is a circle.
pub const MAX_OVER_MIN_CIRCLE_LIMIT: f32 = 1.4;
/// Secondary rule: upper bound on max/mean for borderline circles.
pub const MAX_OVER_MEAN_CIRCLE_LIMIT: f32 = 1.51;
/// Secondary rule: upper bound on min/mean for borderline circles.
pub const MIN_OVER_MEAN_CIRCLE_LIMIT: f32 = 0.53;

/// Apply the fixed threshold rules to one coefficient triple.
///
/// Near-circular shapes have boundary points roughly equidistant from the
/// centroid, so max/min sits near 1; rectangle corners push it up. The
/// secondary conjunction catches circles whose max/min is borderline but
/// whose max/mean and min/mean both indicate a near-uniform radius.
///
/// Pure and order-independent; NaN coefficients fail every comparison and
/// land on the rectangle side.
pub fn classify(coefficients: &ShapeCoefficients) -> ShapeLabel {
    let circular = coefficients.max_over_min < MAX_OVER_MIN_CIRCLE_LIMIT
        || (coefficients.max_over_mean < MAX_OVER_MEAN_CIRCLE_LIMIT
            && coefficients.min_over_mean < MIN_OVER_MEAN_CIRCLE_LIMIT);

    if circular {
        ShapeLabel::Circle
    } else {
        ShapeLabel::Rectangle
    }
}
