//! File and memory codecs on top of the `image` crate.
//!
//! CPU-bound work runs on tokio's blocking thread pool.

use {
    crate::*,
    clarity_base::Vec2,
    crates_image::{ExtendedColorType, ImageEncoder},
    std::path::{Path, PathBuf},
};

fn decode_inner(data: &[u8]) -> Result<RawFrame, ImageError> {
    let img = crates_image::load_from_memory(data)?;
    let size = Vec2::new(img.width() as usize, img.height() as usize);
    let raw = if img.color().has_alpha() {
        RawFrame::new(size, RawFormat::Rgba8, img.into_rgba8().into_raw())
    } else {
        RawFrame::new(size, RawFormat::Rgb8, img.into_rgb8().into_raw())
    };
    Ok(raw)
}

/// Bytes and color type of a frame in a form the encoders accept.
fn encodable(frame: &Frame) -> (Vec<u8>, ExtendedColorType) {
    match frame.pixels() {
        Pixels::U8(data) => {
            let color = match frame.format() {
                PixelFormat::Rgb8 => ExtendedColorType::Rgb8,
                PixelFormat::Rgba8 => ExtendedColorType::Rgba8,
                _ => ExtendedColorType::L8,
            };
            (data.clone(), color)
        }
        Pixels::F32(data) => (
            data.iter()
                .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
                .collect(),
            ExtendedColorType::L8,
        ),
    }
}

fn encode_png_inner(frame: &Frame) -> Result<Vec<u8>, ImageError> {
    let (data, color) = encodable(frame);
    let mut buffer = Vec::new();
    crates_image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(&data, frame.width() as u32, frame.height() as u32, color)
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

fn encode_jpeg_inner(frame: &Frame, quality: u8) -> Result<Vec<u8>, ImageError> {
    let (data, color) = encodable(frame);
    // JPEG has no alpha channel
    let (data, color) = match color {
        ExtendedColorType::Rgba8 => (
            data.chunks_exact(4).flat_map(|px| &px[..3]).copied().collect(),
            ExtendedColorType::Rgb8,
        ),
        other => (data, other),
    };
    let mut buffer = Vec::new();
    crates_image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&data, frame.width() as u32, frame.height() as u32, color)
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Decodes an encoded image (PNG, JPEG, BMP, WebP) into a capture-style frame.
///
/// Images with alpha become `RawFormat::Rgba8`, all others `RawFormat::Rgb8`.
pub async fn decode_image(data: &[u8]) -> Result<RawFrame, ImageError> {
    let owned = data.to_vec();
    tokio::task::spawn_blocking(move || decode_inner(&owned))
        .await
        .map_err(|e| ImageError::Decode(e.to_string()))?
}

/// Reads and decodes an image file.
pub async fn load_image(path: impl AsRef<Path>) -> Result<RawFrame, ImageError> {
    let path: PathBuf = path.as_ref().to_path_buf();
    tokio::task::spawn_blocking(move || {
        let data = std::fs::read(&path)?;
        decode_inner(&data)
    })
    .await
    .map_err(|e| ImageError::Decode(e.to_string()))?
}

/// Encodes a frame as PNG, keeping alpha if present.
pub async fn encode_png(frame: Frame) -> Result<Vec<u8>, ImageError> {
    tokio::task::spawn_blocking(move || encode_png_inner(&frame))
        .await
        .map_err(|e| ImageError::Encode(e.to_string()))?
}

/// Encodes a frame as JPEG (`quality` 1-100); alpha is stripped.
pub async fn encode_jpeg(frame: Frame, quality: u8) -> Result<Vec<u8>, ImageError> {
    tokio::task::spawn_blocking(move || encode_jpeg_inner(&frame, quality))
        .await
        .map_err(|e| ImageError::Encode(e.to_string()))?
}
