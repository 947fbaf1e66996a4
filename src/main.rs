use clap::Parser;
use std::path::PathBuf;

use shapeid::detection::scoring;
use shapeid::{dataset, detection, ClassifyError, ShapeLabel};

#[derive(Parser)]
#[command(name = "shapeid")]
#[command(about = "Classify silhouette images as circles or rectangles")]
struct Cli {
    /// Directory of shape images; file names start with 'c' (circle) or
    /// 'r' (rectangle)
    #[arg(value_name = "SHAPES_DIR")]
    shapes_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save per-step debug images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Skip accuracy scoring (for directories without labelled file names)
    #[arg(long)]
    skip_scoring: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let paths = dataset::list_shape_images(&args.shapes_dir)?;
    if paths.is_empty() {
        return Err(ClassifyError::EmptyDataset.into());
    }

    // Resolve ground truth before the heavy work so a mislabelled file name
    // fails fast instead of mis-scoring at the end
    let ground_truth = if args.skip_scoring {
        None
    } else {
        Some(dataset::ground_truth(&paths)?)
    };

    if args.verbose {
        println!("Loading {} images from {}", paths.len(), args.shapes_dir.display());
    }
    let images = dataset::load_images(&paths)?;

    // Build pipeline
    let mut pipeline = detection::build_standard_pipeline(args.verbose);
    if let Some(debug_dir) = args.debug_out {
        pipeline = pipeline.with_debug(debug_dir)?;
    }

    if args.verbose {
        println!("Running pipeline...\n");
    }
    let results = pipeline.run(images)?;

    // Collect predicted labels in input order; shapes the pipeline flagged
    // as degenerate without a label are reported but do not abort the batch
    let mut kept_indices = Vec::new();
    let mut predicted = Vec::new();
    for (i, item) in results.iter().enumerate() {
        match item.get_int("label") {
            Some(1) => {
                kept_indices.push(i);
                predicted.push(ShapeLabel::Circle);
            }
            Some(_) => {
                kept_indices.push(i);
                predicted.push(ShapeLabel::Rectangle);
            }
            None => {
                let reason = item.get_string("error").unwrap_or("no usable contour");
                println!("Could not classify object no. {}: {}", i, reason);
            }
        }
    }

    println!("\n=== Shape Classification Results ===");
    println!("Total shapes classified: {}", predicted.len());
    if args.verbose {
        for (idx, label) in kept_indices.iter().zip(&predicted) {
            let name = paths[*idx]
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("?");
            println!("  {} → {}", name, label);
        }
    }

    if let Some(truth) = ground_truth {
        // Score over the classified subset, keeping the original indices
        // for the mismatch notices
        let truth_subset: Vec<ShapeLabel> = kept_indices.iter().map(|&i| truth[i]).collect();
        let report = scoring::score(&predicted, &truth_subset)?;

        for mismatch in &report.mismatches {
            println!(
                "Wrong classification of object no. {} ({})",
                kept_indices[mismatch.index], mismatch.expected
            );
        }
        println!("Accuracy of classification: {}", report.accuracy);
    }

    Ok(())
}
