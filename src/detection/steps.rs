use anyhow::Result;

use crate::detection::{classifier, contours, features, preprocessing};
use crate::models::{Centroid, DistanceProfile, ShapeCoefficients};
use crate::pipeline::{MetadataValue, PipelineContext, PipelineData, PipelineStep};

/// Convert images to grayscale
pub struct GrayscaleStep;

impl PipelineStep for GrayscaleStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        _context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();
        for item in data {
            let gray = preprocessing::to_grayscale(&item.image);
            result.push(PipelineData {
                image: image::DynamicImage::ImageLuma8(gray),
                metadata: item.metadata,
            });
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Grayscale Conversion"
    }
}

/// Adaptive threshold with inverted polarity
pub struct ThresholdStep {
    pub block_radius: u32,
}

impl PipelineStep for ThresholdStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        _context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();
        for item in data {
            let gray = item.image.to_luma8();
            let thresh = preprocessing::threshold_shapes(&gray, self.block_radius);
            result.push(PipelineData {
                image: image::DynamicImage::ImageLuma8(thresh),
                metadata: item.metadata,
            });
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Adaptive Threshold"
    }
}

/// Morphological closing to seal small holes in the silhouettes
pub struct ClosingStep {
    pub radius: u8,
}

impl PipelineStep for ClosingStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        _context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();
        for item in data {
            let gray = item.image.to_luma8();
            let closed = preprocessing::close_shapes(&gray, self.radius);
            result.push(PipelineData {
                image: image::DynamicImage::ImageLuma8(closed),
                metadata: item.metadata,
            });
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Closing"
    }
}

/// Morphological opening to drop speckle noise
pub struct OpeningStep {
    pub radius: u8,
}

impl PipelineStep for OpeningStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        _context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();
        for item in data {
            let gray = item.image.to_luma8();
            let opened = preprocessing::open_shapes(&gray, self.radius);
            result.push(PipelineData {
                image: image::DynamicImage::ImageLuma8(opened),
                metadata: item.metadata,
            });
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Opening"
    }
}

/// Iterated erosion
pub struct ErosionStep {
    pub radius: u8,
    pub iterations: u32,
}

impl PipelineStep for ErosionStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        _context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();
        for item in data {
            let gray = item.image.to_luma8();
            let eroded = preprocessing::erode_shapes(&gray, self.radius, self.iterations);
            result.push(PipelineData {
                image: image::DynamicImage::ImageLuma8(eroded),
                metadata: item.metadata,
            });
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Erosion"
    }
}

/// Iterated dilation. Available for custom chains; the standard chain runs
/// edge detection on the eroded images directly.
pub struct DilationStep {
    pub radius: u8,
    pub iterations: u32,
}

impl PipelineStep for DilationStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        _context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();
        for item in data {
            let gray = item.image.to_luma8();
            let dilated = preprocessing::dilate_shapes(&gray, self.radius, self.iterations);
            result.push(PipelineData {
                image: image::DynamicImage::ImageLuma8(dilated),
                metadata: item.metadata,
            });
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Dilation"
    }
}

/// Detect edges using Canny
pub struct EdgeDetectionStep {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl PipelineStep for EdgeDetectionStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        _context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();
        for item in data {
            let gray = item.image.to_luma8();
            let edges = preprocessing::detect_edges(&gray, self.low_threshold, self.high_threshold);
            result.push(PipelineData {
                image: image::DynamicImage::ImageLuma8(edges),
                metadata: item.metadata,
            });
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Edge Detection"
    }
}

/// Locate the first contour of each edge map and store its centroid.
///
/// Shapes without a usable contour are kept in the batch (order must be
/// preserved for scoring) but flagged via the "degenerate" / "error"
/// metadata instead of receiving centroid coordinates.
pub struct CentroidStep;

impl PipelineStep for CentroidStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();
        for (i, item) in data.into_iter().enumerate() {
            let edges = item.image.to_luma8();
            let centroid = contours::first_contour(&edges).and_then(|c| contours::centroid_of(&c));

            let new_item = match centroid {
                Ok(centroid) => item
                    .with_metadata("centroid_row", MetadataValue::Int(centroid.row as i32))
                    .with_metadata("centroid_col", MetadataValue::Int(centroid.col as i32)),
                Err(err) => {
                    if context.verbose {
                        println!("  Shape {}: {}", i, err);
                    }
                    item.with_metadata("degenerate", MetadataValue::Bool(true))
                        .with_metadata("error", MetadataValue::String(err.to_string()))
                }
            };
            result.push(new_item);
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Centroid Extraction"
    }
}

/// Profile boundary-to-centroid distances for each edge map.
pub struct DistanceProfileStep {
    pub normalization: features::MeanNormalization,
}

impl PipelineStep for DistanceProfileStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        _context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        // The legacy normalization divides every mean by the first image's
        // boundary count, so that count has to be fixed before the per-image
        // scan starts.
        let first_count = data
            .first()
            .map(|item| features::boundary_pixel_count(&item.image.to_luma8()))
            .unwrap_or(0);

        let mut result = Vec::new();
        for item in data {
            let (Some(row), Some(col)) = (item.get_int("centroid_row"), item.get_int("centroid_col"))
            else {
                // No centroid, nothing to measure against
                result.push(item);
                continue;
            };

            let edges = item.image.to_luma8();
            let own_count = features::boundary_pixel_count(&edges);
            let divisor = match self.normalization {
                features::MeanNormalization::FirstImageCount => first_count,
                features::MeanNormalization::PerImageCount => own_count,
            };

            let centroid = Centroid {
                row: row as u32,
                col: col as u32,
            };
            let profile = features::distance_profile(&edges, centroid, divisor);

            result.push(
                item.with_metadata("boundary_count", MetadataValue::Int(own_count as i32))
                    .with_metadata("min_distance", MetadataValue::Float(profile.min_distance))
                    .with_metadata("max_distance", MetadataValue::Float(profile.max_distance))
                    .with_metadata("mean_distance", MetadataValue::Float(profile.mean_distance)),
            );
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Distance Profiling"
    }
}

/// Convert distance profiles into the three shape coefficients.
pub struct CoefficientStep;

impl PipelineStep for CoefficientStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        _context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();
        for item in data {
            let (Some(min), Some(max), Some(mean)) = (
                item.get_float("min_distance"),
                item.get_float("max_distance"),
                item.get_float("mean_distance"),
            ) else {
                result.push(item);
                continue;
            };

            let profile = DistanceProfile {
                min_distance: min,
                max_distance: max,
                mean_distance: mean,
            };
            // Explicit fallback source: the image's own row-dimension
            let fallback = item.image.height() as f32;
            let fell_back = features::needs_fallback(&profile);
            let coefficients = features::shape_coefficients(&profile, fallback);

            let mut new_item = item
                .with_metadata("max_over_min", MetadataValue::Float(coefficients.max_over_min))
                .with_metadata("max_over_mean", MetadataValue::Float(coefficients.max_over_mean))
                .with_metadata("min_over_mean", MetadataValue::Float(coefficients.min_over_mean));
            if fell_back {
                new_item = new_item.with_metadata("degenerate", MetadataValue::Bool(true));
            }
            result.push(new_item);
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Shape Coefficients"
    }
}

/// Apply the threshold rules and store the predicted label.
pub struct ClassifyStep;

impl PipelineStep for ClassifyStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        _context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();
        for item in data {
            let (Some(max_over_min), Some(max_over_mean), Some(min_over_mean)) = (
                item.get_float("max_over_min"),
                item.get_float("max_over_mean"),
                item.get_float("min_over_mean"),
            ) else {
                result.push(item);
                continue;
            };

            let coefficients = ShapeCoefficients {
                max_over_min,
                max_over_mean,
                min_over_mean,
            };
            let label = classifier::classify(&coefficients);

            result.push(
                item.with_metadata("label", MetadataValue::Int(label.numeric() as i32))
                    .with_metadata("class", MetadataValue::String(label.to_string())),
            );
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Classification"
    }
}
