use std::path::Path;

use image::{GrayImage, ImageBuffer, ImageFormat, Luma};
use ndarray::Array2;
use tracing::debug;

use crate::error::{Result, SuperResError};
use crate::frame::Frame;

/// File extensions [`load_image`] understands.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "tif", "tiff", "jpg", "jpeg", "bmp", "pgm"];

/// Load an image file as a grayscale frame with values in [0.0, 1.0].
pub fn load_image(path: &Path) -> Result<Frame> {
    let img = image::open(path)?;
    let bit_depth = if img.color().bytes_per_pixel() > img.color().channel_count() {
        16
    } else {
        8
    };
    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();
    let data = Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
        gray.get_pixel(col as u32, row as u32).0[0] as f32 / 65535.0
    });
    debug!(path = %path.display(), width = w, height = h, "Loaded frame");

    Ok(Frame::new(data, bit_depth))
}

/// Save a frame as 16-bit grayscale TIFF. Values are clamped to [0.0, 1.0].
pub fn save_tiff(frame: &Frame, path: &Path) -> Result<()> {
    let pixels: Vec<u16> = frame
        .data
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 65535.0).round() as u16)
        .collect();

    let img = ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(
        frame.width() as u32,
        frame.height() as u32,
        pixels,
    )
    .ok_or_else(|| SuperResError::Pipeline("pixel buffer does not match frame size".into()))?;
    img.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save a frame as 8-bit grayscale PNG. Values are clamped to [0.0, 1.0].
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let mut img = GrayImage::new(frame.width() as u32, frame.height() as u32);
    for ((row, col), &v) in frame.data.indexed_iter() {
        let val = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        img.put_pixel(col as u32, row as u32, Luma([val]));
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save frame, choosing format from file extension (TIFF when unknown).
pub fn save_image(frame: &Frame, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => save_png(frame, path),
        _ => save_tiff(frame, path),
    }
}

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
