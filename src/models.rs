use std::fmt;

use crate::error::ClassifyError;

/// Predicted or ground-truth class of a silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeLabel {
    Circle,
    Rectangle,
}

impl ShapeLabel {
    /// Derive the ground-truth class from a shape file name.
    ///
    /// File names in a labelled dataset start with `c` (circle) or
    /// `r` (rectangle); anything else is rejected rather than silently
    /// scored as a rectangle.
    pub fn from_file_name(name: &str) -> Result<Self, ClassifyError> {
        match name.chars().next() {
            Some('c') => Ok(ShapeLabel::Circle),
            Some('r') => Ok(ShapeLabel::Rectangle),
            _ => Err(ClassifyError::UnknownClass(name.to_string())),
        }
    }

    /// Numeric encoding used in result arrays: circle = 1, rectangle = 0.
    pub fn numeric(self) -> u8 {
        match self {
            ShapeLabel::Circle => 1,
            ShapeLabel::Rectangle => 0,
        }
    }
}

impl fmt::Display for ShapeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeLabel::Circle => write!(f, "circle"),
            ShapeLabel::Rectangle => write!(f, "rectangle"),
        }
    }
}

/// Contour centroid in integer pixel coordinates (truncated, not rounded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Centroid {
    pub row: u32,
    pub col: u32,
}

/// Min/max/mean Euclidean distance from boundary pixels to the centroid.
///
/// `min_distance` starts from the image row-dimension sentinel, so an image
/// without any boundary pixels keeps `min_distance` at the sentinel and
/// `max_distance` at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceProfile {
    pub min_distance: f32,
    pub max_distance: f32,
    pub mean_distance: f32,
}

impl DistanceProfile {
    /// True when no boundary pixel was ever folded into the profile.
    pub fn is_empty(&self) -> bool {
        self.max_distance == 0.0
    }
}

/// Dimensionless shape descriptors derived from a [`DistanceProfile`].
///
/// Near-circular shapes have `max_over_min` close to 1; rectangles spread
/// it out through their corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeCoefficients {
    pub max_over_min: f32,
    pub max_over_mean: f32,
    pub min_over_mean: f32,
}

/// Everything the classifier derived for one shape image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedShape {
    pub label: ShapeLabel,
    pub centroid: Centroid,
    pub profile: DistanceProfile,
    pub coefficients: ShapeCoefficients,
    /// Set when the coefficient fallback path was taken (zero min or mean
    /// distance), so callers can flag the result instead of trusting it.
    pub degenerate: bool,
}

/// One disagreement between a predicted label and the ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    /// Index into the scored sequence.
    pub index: usize,
    /// The true class the shape should have received.
    pub expected: ShapeLabel,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wrong classification of object no. {} ({})",
            self.index, self.expected
        )
    }
}

/// Aggregate scoring result for a labelled batch.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyReport {
    /// Fraction of correctly classified shapes, in [0, 1].
    pub accuracy: f32,
    pub correct: usize,
    pub total: usize,
    pub mismatches: Vec<Mismatch>,
}
