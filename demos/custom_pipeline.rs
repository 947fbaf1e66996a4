use std::sync::Arc;

use image::{DynamicImage, GrayImage, Luma};
use shapeid::detection::features::MeanNormalization;
use shapeid::detection::steps::*;
use shapeid::Pipeline;

/// Compose a classification pipeline by hand, with a dilation pass and the
/// corrected per-image mean normalization instead of the defaults.
fn main() -> anyhow::Result<()> {
    let pipeline = Pipeline::new()
        .with_verbose(true)
        .add_step(Arc::new(GrayscaleStep))
        .add_step(Arc::new(ThresholdStep { block_radius: 7 }))
        .add_step(Arc::new(ClosingStep { radius: 2 }))
        .add_step(Arc::new(OpeningStep { radius: 1 }))
        .add_step(Arc::new(ErosionStep {
            radius: 2,
            iterations: 2,
        }))
        .add_step(Arc::new(DilationStep {
            radius: 2,
            iterations: 1,
        }))
        .add_step(Arc::new(EdgeDetectionStep {
            low_threshold: 100.0,
            high_threshold: 200.0,
        }))
        .add_step(Arc::new(CentroidStep))
        .add_step(Arc::new(DistanceProfileStep {
            normalization: MeanNormalization::PerImageCount,
        }))
        .add_step(Arc::new(CoefficientStep))
        .add_step(Arc::new(ClassifyStep));

    let inputs = vec![silhouette(160, true), silhouette(160, false)];
    let results = pipeline.run(inputs)?;

    println!("\n=== Custom Pipeline Results ===");
    for (i, item) in results.iter().enumerate() {
        match item.get_string("class") {
            Some(class) => println!(
                "  Shape {}: {} (max/min={:.3})",
                i,
                class,
                item.get_float("max_over_min").unwrap_or(0.0)
            ),
            None => println!(
                "  Shape {}: not classified ({})",
                i,
                item.get_string("error").unwrap_or("no label")
            ),
        }
    }

    Ok(())
}

/// Quick in-memory silhouette: a circle or a 2:1 rectangle.
fn silhouette(size: u32, circle: bool) -> DynamicImage {
    let center = (size / 2) as f32;
    let img = GrayImage::from_fn(size, size, |x, y| {
        let inside = if circle {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            (dx * dx + dy * dy).sqrt() <= 45.0
        } else {
            let dx = (x as f32 - center).abs();
            let dy = (y as f32 - center).abs();
            dx <= 50.0 && dy <= 25.0
        };
        let texture = ((x * 7 + y * 13) % 17) as u8;
        if inside {
            Luma([30 + texture])
        } else {
            Luma([210 + texture])
        }
    });
    DynamicImage::ImageLuma8(img)
}
