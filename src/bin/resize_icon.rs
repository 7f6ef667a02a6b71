/// Fit the app icon onto a transparent 1024x1024 canvas
use anyhow::{Context, Result};
use image::{imageops, imageops::FilterType, GenericImageView, RgbaImage};

const INPUT_PATH: &str = "assets/icon.png";
const OUTPUT_PATH: &str = "assets/icon-resized.png";
const TARGET_SIZE: u32 = 1024;

fn main() -> Result<()> {
    let source =
        image::open(INPUT_PATH).with_context(|| format!("failed to open {}", INPUT_PATH))?;

    // Scale to fit within the target square, keeping aspect ratio.
    let resized = source.resize(TARGET_SIZE, TARGET_SIZE, FilterType::Lanczos3);

    // Zero-initialized pixels are fully transparent.
    let mut canvas = RgbaImage::new(TARGET_SIZE, TARGET_SIZE);
    let x = (TARGET_SIZE - resized.width()) / 2;
    let y = (TARGET_SIZE - resized.height()) / 2;
    imageops::overlay(&mut canvas, &resized.to_rgba8(), i64::from(x), i64::from(y));

    canvas
        .save(OUTPUT_PATH)
        .with_context(|| format!("failed to write {}", OUTPUT_PATH))?;

    println!(
        "Image resized successfully: {}x{} -> {}",
        TARGET_SIZE, TARGET_SIZE, OUTPUT_PATH
    );
    Ok(())
}
