use image::{DynamicImage, GrayImage};
use imageproc::contrast::adaptive_threshold;
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::morphology::{close, dilate, erode, open};

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Adaptive threshold with inverted polarity: dark shapes on a light
/// background come out as white (255) on black (0).
pub fn threshold_shapes(img: &GrayImage, block_radius: u32) -> GrayImage {
    let mut thresh = adaptive_threshold(img, block_radius);
    image::imageops::invert(&mut thresh);
    thresh
}

/// Morphological closing (dilation followed by erosion) with a square
/// structuring element of the given radius.
pub fn close_shapes(img: &GrayImage, radius: u8) -> GrayImage {
    close(img, Norm::LInf, radius)
}

/// Morphological opening (erosion followed by dilation) with a square
/// structuring element of the given radius.
pub fn open_shapes(img: &GrayImage, radius: u8) -> GrayImage {
    open(img, Norm::LInf, radius)
}

/// Iterated erosion with a square structuring element.
pub fn erode_shapes(img: &GrayImage, radius: u8, iterations: u32) -> GrayImage {
    let mut out = img.clone();
    for _ in 0..iterations {
        out = erode(&out, Norm::LInf, radius);
    }
    out
}

/// Iterated dilation with a square structuring element.
pub fn dilate_shapes(img: &GrayImage, radius: u8, iterations: u32) -> GrayImage {
    let mut out = img.clone();
    for _ in 0..iterations {
        out = dilate(&out, Norm::LInf, radius);
    }
    out
}

/// Detect edges using Canny edge detector
pub fn detect_edges(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    canny(img, low_threshold, high_threshold)
}
