pub mod classifier;
pub mod contours;
pub mod features;
pub mod preprocessing;
pub mod scoring;
pub mod steps;

use image::{DynamicImage, GrayImage};

use crate::error::ClassifyError;
use crate::models::ClassifiedShape;
use features::MeanNormalization;

/// Main classification pipeline orchestrator.
///
/// Owns the preprocessing tunables and the feature-extraction quirk
/// switches; the defaults reproduce the legacy behavior.
pub struct ShapeClassifier {
    // Preprocessing parameters
    pub block_radius: u32,
    pub closing_radius: u8,
    pub opening_radius: u8,
    pub erosion_radius: u8,
    pub erosion_iterations: u32,
    pub canny_low: f32,
    pub canny_high: f32,
    // Feature extraction
    pub normalization: MeanNormalization,
    pub verbose: bool,
}

impl ShapeClassifier {
    pub fn new() -> Self {
        Self {
            block_radius: 5,
            closing_radius: 2,
            opening_radius: 1,
            erosion_radius: 2,
            erosion_iterations: 4,
            canny_low: 100.0,
            canny_high: 200.0,
            normalization: MeanNormalization::default(),
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_normalization(mut self, normalization: MeanNormalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Reduce one source image to a binary edge map (boundary = 255).
    ///
    /// Grayscale → inverted adaptive threshold → closing → opening →
    /// iterated erosion → Canny.
    pub fn preprocess(&self, img: &DynamicImage) -> GrayImage {
        let gray = preprocessing::to_grayscale(img);
        let thresh = preprocessing::threshold_shapes(&gray, self.block_radius);
        let closed = preprocessing::close_shapes(&thresh, self.closing_radius);
        let opened = preprocessing::open_shapes(&closed, self.opening_radius);
        let eroded =
            preprocessing::erode_shapes(&opened, self.erosion_radius, self.erosion_iterations);
        preprocessing::detect_edges(&eroded, self.canny_low, self.canny_high)
    }

    /// Classify a batch of edge maps, preserving input order.
    ///
    /// Failures stay per-item: a degenerate shape produces an `Err` slot and
    /// the rest of the batch is still classified.
    pub fn classify_edges(
        &self,
        edge_maps: &[GrayImage],
    ) -> Vec<Result<ClassifiedShape, ClassifyError>> {
        // Shared mean divisor for the legacy normalization; must be known
        // before any per-image profiling starts.
        let first_count = edge_maps
            .first()
            .map(features::boundary_pixel_count)
            .unwrap_or(0);

        let mut results = Vec::with_capacity(edge_maps.len());
        for (i, edges) in edge_maps.iter().enumerate() {
            let outcome = self.classify_one(edges, first_count);
            if self.verbose {
                match &outcome {
                    Ok(shape) => println!(
                        "  Shape {}: {} (max/min={:.3}, max/mean={:.3}, min/mean={:.3}{})",
                        i,
                        shape.label,
                        shape.coefficients.max_over_min,
                        shape.coefficients.max_over_mean,
                        shape.coefficients.min_over_mean,
                        if shape.degenerate { ", degenerate" } else { "" },
                    ),
                    Err(err) => println!("  Shape {}: {}", i, err),
                }
            }
            results.push(outcome);
        }
        results
    }

    fn classify_one(
        &self,
        edges: &GrayImage,
        first_count: u32,
    ) -> Result<ClassifiedShape, ClassifyError> {
        let contour = contours::first_contour(edges)?;
        let centroid = contours::centroid_of(&contour)?;

        let divisor = match self.normalization {
            MeanNormalization::FirstImageCount => first_count,
            MeanNormalization::PerImageCount => features::boundary_pixel_count(edges),
        };
        let profile = features::distance_profile(edges, centroid, divisor);

        // Explicit fallback source: the image's own row-dimension
        let fallback = edges.height() as f32;
        let degenerate = features::needs_fallback(&profile);
        let coefficients = features::shape_coefficients(&profile, fallback);
        let label = classifier::classify(&coefficients);

        Ok(ClassifiedShape {
            label,
            centroid,
            profile,
            coefficients,
            degenerate,
        })
    }

    /// Run the full chain on a batch of source images: preprocess each one,
    /// then classify the resulting edge maps.
    pub fn run(&self, images: &[DynamicImage]) -> Vec<Result<ClassifiedShape, ClassifyError>> {
        if self.verbose {
            println!("Preprocessing {} images...", images.len());
        }
        let edge_maps: Vec<GrayImage> = images.iter().map(|img| self.preprocess(img)).collect();

        if self.verbose {
            println!("Classifying {} edge maps...", edge_maps.len());
        }
        self.classify_edges(&edge_maps)
    }
}

impl Default for ShapeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the standard classification pipeline using the composable pipeline
/// system. Mirrors [`ShapeClassifier::run`] step for step.
pub fn build_standard_pipeline(verbose: bool) -> crate::pipeline::Pipeline {
    use crate::pipeline::Pipeline;
    use std::sync::Arc;

    Pipeline::new()
        .with_verbose(verbose)
        .add_step(Arc::new(steps::GrayscaleStep))
        .add_step(Arc::new(steps::ThresholdStep { block_radius: 5 }))
        .add_step(Arc::new(steps::ClosingStep { radius: 2 }))
        .add_step(Arc::new(steps::OpeningStep { radius: 1 }))
        .add_step(Arc::new(steps::ErosionStep {
            radius: 2,
            iterations: 4,
        }))
        // Dilation available via DilationStep; the standard chain feeds
        // Canny from the eroded images
        .add_step(Arc::new(steps::EdgeDetectionStep {
            low_threshold: 100.0,
            high_threshold: 200.0,
        }))
        .add_step(Arc::new(steps::CentroidStep))
        .add_step(Arc::new(steps::DistanceProfileStep {
            normalization: MeanNormalization::default(),
        }))
        .add_step(Arc::new(steps::CoefficientStep))
        .add_step(Arc::new(steps::ClassifyStep))
}
