use crate::error::ClassifyError;
use crate::models::{AccuracyReport, Mismatch, ShapeLabel};

/// Score predicted labels against index-aligned ground truth.
///
/// The caller guarantees that both sequences follow the same sorted input
/// order; nothing is re-sorted here. Differing lengths fail fast with
/// [`ClassifyError::LabelAlignment`] and an empty batch with
/// [`ClassifyError::EmptyDataset`] — never a silent divide by zero.
pub fn score(
    predicted: &[ShapeLabel],
    ground_truth: &[ShapeLabel],
) -> Result<AccuracyReport, ClassifyError> {
    if predicted.len() != ground_truth.len() {
        return Err(ClassifyError::LabelAlignment {
            predicted: predicted.len(),
            expected: ground_truth.len(),
        });
    }
    if predicted.is_empty() {
        return Err(ClassifyError::EmptyDataset);
    }

    let mut correct = 0usize;
    let mut mismatches = Vec::new();

    for (index, (label, truth)) in predicted.iter().zip(ground_truth).enumerate() {
        if label == truth {
            correct += 1;
        } else {
            mismatches.push(Mismatch {
                index,
                expected: *truth,
            });
        }
    }

    Ok(AccuracyReport {
        accuracy: correct as f32 / predicted.len() as f32,
        correct,
        total: predicted.len(),
        mismatches,
    })
}
