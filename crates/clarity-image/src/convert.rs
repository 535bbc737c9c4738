//! Color conversions between interleaved frames and planar representations.
//!
//! Two YUV flavors appear here. Camera YUYV buffers carry BT.601 YCbCr and
//! are only decoded. The planar split used for enhancement is analog BT.601
//! YUV (`U = 0.492 (B - Y)`, `V = 0.877 (R - Y)`, both offset by 128), which
//! is what the luma/chroma reconstruction round-trips through.

use {crate::*, clarity_base::Vec2};

/// BT.601 luma of one pixel, fixed-point with 14 fractional bits.
pub fn luma_bt601(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 4899 + g as u32 * 9617 + b as u32 * 1868 + 8192) >> 14) as u8
}

fn saturate(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

pub fn rgb_to_yuv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (r as f32, g as f32, b as f32);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let u = 0.492 * (b - y) + 128.0;
    let v = 0.877 * (r - y) + 128.0;
    (saturate(y), saturate(u), saturate(v))
}

pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let y = y as f32;
    let u = u as f32 - 128.0;
    let v = v as f32 - 128.0;
    let r = y + 1.140 * v;
    let g = y - 0.395 * u - 0.581 * v;
    let b = y + 2.032 * u;
    (saturate(r), saturate(g), saturate(b))
}

/// Converts packed YUYV (YCbCr 4:2:2) to RGB using BT.601 coefficients.
///
/// Returns `None` if `data` is shorter than `width * height * 2` bytes or the
/// width is odd.
pub fn yuyv_to_rgb(data: &[u8], size: Vec2<usize>) -> Option<Vec<u8>> {
    if size.x % 2 != 0 {
        return None;
    }
    let pixel_count = size.checked_area()?;
    let expected_len = pixel_count * 2;
    if data.len() < expected_len {
        return None;
    }

    let mut rgb = Vec::with_capacity(pixel_count * 3);
    for chunk in data[..expected_len].chunks_exact(4) {
        let u = chunk[1] as f32 - 128.0;
        let v = chunk[3] as f32 - 128.0;
        for y in [chunk[0] as f32, chunk[2] as f32] {
            rgb.push((y + 1.402 * v).clamp(0.0, 255.0) as u8);
            rgb.push((y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8);
            rgb.push((y + 1.772 * u).clamp(0.0, 255.0) as u8);
        }
    }
    Some(rgb)
}

/// Single-channel luminance of any frame.
pub fn luma(frame: &Frame) -> Result<Plane<u8>, FrameError> {
    let data = match (frame.pixels(), frame.format()) {
        (Pixels::U8(data), PixelFormat::Rgb8 | PixelFormat::Rgba8) => data
            .chunks_exact(frame.channels())
            .map(|px| luma_bt601(px[0], px[1], px[2]))
            .collect(),
        (Pixels::U8(data), _) => data.clone(),
        (Pixels::F32(data), _) => data
            .iter()
            .map(|&v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
            .collect(),
    };
    Plane::new(frame.size(), data)
}

/// A color frame split into luma and two chroma planes of equal size.
#[derive(Debug, Clone)]
pub struct YuvPlanes {
    pub y: Plane<u8>,
    pub u: Plane<u8>,
    pub v: Plane<u8>,
}

impl YuvPlanes {
    /// Decompose an `Rgb8` or `Rgba8` frame; alpha is discarded.
    pub fn split(frame: &Frame) -> Result<Self, FrameError> {
        let data = match frame.pixels() {
            Pixels::U8(data) if frame.format().is_color() => data,
            _ => {
                return Err(FrameError::Format {
                    expected: "Rgb8 or Rgba8",
                    got: frame.format(),
                });
            }
        };
        let area = frame.size().area();
        let mut y = Vec::with_capacity(area);
        let mut u = Vec::with_capacity(area);
        let mut v = Vec::with_capacity(area);
        for px in data.chunks_exact(frame.channels()) {
            let (py, pu, pv) = rgb_to_yuv(px[0], px[1], px[2]);
            y.push(py);
            u.push(pu);
            v.push(pv);
        }
        Ok(Self {
            y: Plane::new(frame.size(), y)?,
            u: Plane::new(frame.size(), u)?,
            v: Plane::new(frame.size(), v)?,
        })
    }

    /// Recombine into an interleaved `Rgb8` or opaque `Rgba8` frame.
    pub fn merge(&self, format: PixelFormat) -> Result<Frame, FrameError> {
        if !format.is_color() {
            return Err(FrameError::Format {
                expected: "Rgb8 or Rgba8",
                got: format,
            });
        }
        let size = self.y.size();
        for chroma in [&self.u, &self.v] {
            if chroma.size() != size {
                return Err(FrameError::SizeMismatch {
                    expected: size,
                    got: chroma.size(),
                });
            }
        }

        let channels = format.channels();
        let mut data = Vec::with_capacity(size.area() * channels);
        let planes = self.y.data().iter().zip(self.u.data()).zip(self.v.data());
        for ((&y, &u), &v) in planes {
            let (r, g, b) = yuv_to_rgb(y, u, v);
            data.extend_from_slice(&[r, g, b]);
            if channels == 4 {
                data.push(u8::MAX);
            }
        }
        Frame::from_u8(size, format, data)
    }
}
