use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{DynamicImage, ImageReader};

use crate::error::ClassifyError;
use crate::models::ShapeLabel;

/// List the shape image files in a directory, sorted by file name.
///
/// The sorted order is the ordering contract for the whole run: edge maps,
/// predicted labels and ground truth all follow it.
pub fn list_shape_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read shapes directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Resolve ground-truth labels from file names, once, at the system
/// boundary. Fails fast on any name that does not start with 'c' or 'r'.
pub fn ground_truth(paths: &[PathBuf]) -> Result<Vec<ShapeLabel>, ClassifyError> {
    paths
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default();
            ShapeLabel::from_file_name(name)
        })
        .collect()
}

/// Load every listed image, keeping the sorted order.
pub fn load_images(paths: &[PathBuf]) -> Result<Vec<DynamicImage>> {
    paths
        .iter()
        .map(|path| {
            ImageReader::open(path)
                .with_context(|| format!("failed to open image {}", path.display()))?
                .decode()
                .map_err(|e| anyhow::anyhow!("failed to decode image {}: {}", path.display(), e))
        })
        .collect()
}
