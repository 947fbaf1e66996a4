use thiserror::Error;

/// Errors that can occur while classifying a batch of shape images.
///
/// `DegenerateShape` and `NoContours` are per-image: a single bad shape is
/// reported and the rest of the batch keeps going. The remaining variants
/// are batch-level and fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClassifyError {
    #[error("no contours found in edge image")]
    NoContours,

    #[error("degenerate contour with zero area, centroid is undefined")]
    DegenerateShape,

    #[error("empty dataset, nothing to score")]
    EmptyDataset,

    #[error("label count {predicted} does not match ground-truth count {expected}")]
    LabelAlignment { predicted: usize, expected: usize },

    #[error("cannot derive a class from file name '{0}': expected leading 'c' or 'r'")]
    UnknownClass(String),
}
