// Image loading module
// Decodes status icons and prepares them for the grayscale display canvas

use anyhow::{Context, Result};
use image::{DynamicImage, GrayImage, ImageFormat};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Icon ready to be pasted onto the canvas
#[derive(Debug, Clone)]
pub struct IconImage {
    /// Icon width in pixels
    pub width: u32,
    /// Icon height in pixels
    pub height: u32,
    /// Luma pixels, already inverted when requested
    pub pixels: GrayImage,
    /// Whether `pixels` holds the color-negated rendering
    pub inverted: bool,
}

/// Load an icon file, negating its grayscale channel once if `invert` is set
pub fn load_icon(path: &Path, invert: bool) -> Result<IconImage> {
    let data = fs::read(path)
        .with_context(|| format!("Failed to read icon file: {}", path.display()))?;
    let img = load_from_bytes(&data)
        .with_context(|| format!("Failed to load icon: {}", path.display()))?;

    Ok(prepare_icon(img, invert))
}

/// Convert a decoded image into canvas-ready grayscale pixels
pub fn prepare_icon(img: DynamicImage, invert: bool) -> IconImage {
    let mut pixels = img.to_luma8();
    if invert {
        image::imageops::invert(&mut pixels);
    }
    let (width, height) = pixels.dimensions();

    IconImage {
        width,
        height,
        pixels,
        inverted: invert,
    }
}

/// Load an image from raw bytes, auto-detecting the format
fn load_from_bytes(data: &[u8]) -> Result<DynamicImage> {
    let format = image::guess_format(data).context("Failed to detect image format")?;

    let cursor = Cursor::new(data);
    let img = image::load(cursor, format).context("Failed to decode image")?;

    Ok(img)
}

/// Encode an image to PNG bytes, used when persisting rendered frames
pub fn encode_png(img: &GrayImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(out.into_inner())
}
