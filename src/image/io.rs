//! Codec boundary and on-disk helpers.
//!
//! - `decode_rgb`: turn an encoded byte buffer (PNG/JPEG/...) into [`RgbImage`].
//! - `encode_png`: encode an [`RgbImage`] as PNG bytes.
//! - `load_rgb` / `save_rgb`: path-based variants for the CLI tools.
//! - `write_json_file`: pretty-print a serializable value to disk.

use super::RgbImage;
use crate::error::PipelineError;
use image::{DynamicImage, ImageFormat};
use serde::Serialize;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Decode an encoded image buffer into interleaved RGB.
///
/// Undecodable input is a client fault and maps to [`PipelineError::Decode`].
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, PipelineError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| PipelineError::Decode(e.to_string()))?;
    Ok(from_dynamic(decoded))
}

/// Encode as PNG bytes (for the base64 HTTP response).
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, PipelineError> {
    let buffer = to_buffer(img)
        .ok_or_else(|| PipelineError::Internal("image buffer size mismatch".into()))?;
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(buffer)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| PipelineError::Internal(format!("PNG encode failed: {e}")))?;
    Ok(out.into_inner())
}

/// Read an image from disk as interleaved RGB.
pub fn load_rgb(path: &Path) -> Result<RgbImage, String> {
    let decoded = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    Ok(from_dynamic(decoded))
}

/// Save an [`RgbImage`] to disk; format follows the file extension.
pub fn save_rgb(img: &RgbImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let buffer = to_buffer(img).ok_or_else(|| "image buffer size mismatch".to_string())?;
    DynamicImage::ImageRgb8(buffer)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn from_dynamic(decoded: DynamicImage) -> RgbImage {
    let rgb = decoded.into_rgb8();
    let (w, h) = (rgb.width() as usize, rgb.height() as usize);
    RgbImage {
        w,
        h,
        data: rgb.into_raw(),
    }
}

fn to_buffer(img: &RgbImage) -> Option<image::RgbImage> {
    image::RgbImage::from_raw(img.w as u32, img.h as u32, img.data.clone())
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_report_decode_error() {
        let err = decode_rgb(&[0u8; 16]).unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }

    #[test]
    fn png_round_trip_preserves_pixels() {
        let mut img = RgbImage::new(3, 2);
        img.set(1, 1, [12, 200, 99]);
        let bytes = encode_png(&img).unwrap();
        let back = decode_rgb(&bytes).unwrap();
        assert_eq!(back, img);
    }
}
