use image::{GrayImage, Luma};

/// Write a small labelled dataset of silhouette images into ./shapes,
/// ready for `shapeid shapes`.
fn main() {
    std::fs::create_dir_all("shapes").unwrap();

    let specs = [
        ("circle1.png", Shape::Circle { radius: 40.0 }),
        ("circle2.png", Shape::Circle { radius: 28.0 }),
        ("circle3.png", Shape::Circle { radius: 52.0 }),
        ("rect1.png", Shape::Rect { width: 90, height: 44 }),
        ("rect2.png", Shape::Rect { width: 70, height: 70 }),
        ("rect3.png", Shape::Rect { width: 100, height: 30 }),
    ];

    for (name, shape) in specs {
        let img = render(160, &shape);
        let path = format!("shapes/{}", name);
        img.save(&path).unwrap();
        println!("Created {}", path);
    }
}

enum Shape {
    Circle { radius: f32 },
    Rect { width: u32, height: u32 },
}

/// Dark silhouette on a light background, with a little per-pixel texture
/// so the adaptive threshold has something to bite on.
fn render(size: u32, shape: &Shape) -> GrayImage {
    let center = (size / 2) as f32;
    GrayImage::from_fn(size, size, |x, y| {
        let inside = match shape {
            Shape::Circle { radius } => {
                let dx = x as f32 - center;
                let dy = y as f32 - center;
                (dx * dx + dy * dy).sqrt() <= *radius
            }
            Shape::Rect { width, height } => {
                let left = (size - width) / 2;
                let top = (size - height) / 2;
                x >= left && x < left + width && y >= top && y < top + height
            }
        };
        let texture = ((x * 7 + y * 13) % 17) as u8;
        if inside {
            Luma([30 + texture])
        } else {
            Luma([210 + texture])
        }
    })
}
