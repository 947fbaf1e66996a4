use image::{DynamicImage, GrayImage, Luma};

/// Size used by most fixture edge maps.
pub const MAP_SIZE: u32 = 128;

/// Blank edge map (no boundary pixels at all).
pub fn empty_edge_map(size: u32) -> GrayImage {
    GrayImage::new(size, size)
}

/// One-pixel-wide circle ring of the given radius, centered in a
/// size x size map.
pub fn circle_edge_map(size: u32, radius: f32) -> GrayImage {
    let mut img = GrayImage::new(size, size);
    let center = (size / 2) as f32;
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let dist = (dx * dx + dy * dy).sqrt();
            if (dist - radius).abs() <= 0.5 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
    }
    img
}

/// Axis-aligned rectangle outline of width x height pixels, centered in a
/// size x size map.
pub fn rect_edge_map(size: u32, width: u32, height: u32) -> GrayImage {
    let mut img = GrayImage::new(size, size);
    let left = (size - width) / 2;
    let top = (size - height) / 2;
    let right = left + width - 1;
    let bottom = top + height - 1;

    for x in left..=right {
        img.put_pixel(x, top, Luma([255]));
        img.put_pixel(x, bottom, Luma([255]));
    }
    for y in top..=bottom {
        img.put_pixel(left, y, Luma([255]));
        img.put_pixel(right, y, Luma([255]));
    }
    img
}

/// Horizontal line segment: a contour that traces out zero enclosed area.
pub fn line_edge_map(size: u32, length: u32) -> GrayImage {
    let mut img = GrayImage::new(size, size);
    let y = size / 2;
    let start = (size - length) / 2;
    for x in start..start + length {
        img.put_pixel(x, y, Luma([255]));
    }
    img
}

/// Filled dark circle on a light background, for driving the full
/// preprocessing chain.
pub fn filled_circle_image(size: u32, radius: f32) -> DynamicImage {
    let center = (size / 2) as f32;
    let img = GrayImage::from_fn(size, size, |x, y| {
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        if (dx * dx + dy * dy).sqrt() <= radius {
            Luma([30u8])
        } else {
            Luma([220u8])
        }
    });
    DynamicImage::ImageLuma8(img)
}

/// Filled dark rectangle on a light background.
pub fn filled_rect_image(size: u32, width: u32, height: u32) -> DynamicImage {
    let left = (size - width) / 2;
    let top = (size - height) / 2;
    let img = GrayImage::from_fn(size, size, |x, y| {
        if x >= left && x < left + width && y >= top && y < top + height {
            Luma([30u8])
        } else {
            Luma([220u8])
        }
    });
    DynamicImage::ImageLuma8(img)
}
