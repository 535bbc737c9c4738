use {
    crate::*,
    clarity_base::Vec2,
    crates_image::{ImageBuffer, Luma, Pixel, Rgb, Rgba, imageops},
};

/// Pixel storage of a `Frame`, interleaved row-major.
#[derive(Clone, PartialEq)]
pub enum Pixels {
    U8(Vec<u8>),
    F32(Vec<f32>),
}

impl Pixels {
    pub fn len(&self) -> usize {
        match self {
            Pixels::U8(data) => data.len(),
            Pixels::F32(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An owned image buffer whose length always matches `format` x `size`.
#[derive(Clone, PartialEq)]
pub struct Frame {
    size: Vec2<usize>,
    format: PixelFormat,
    pixels: Pixels,
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("size", &self.size)
            .field("format", &self.format)
            .finish()
    }
}

pub(crate) fn check_size(size: Vec2<usize>, channels: usize, len: usize) -> Result<(), FrameError> {
    if size.x == 0 || size.y == 0 {
        return Err(FrameError::ZeroSize(size));
    }
    let expected = size
        .checked_area()
        .and_then(|area| area.checked_mul(channels))
        .ok_or(FrameError::LengthMismatch {
            expected: usize::MAX,
            got: len,
        })?;
    if expected != len {
        return Err(FrameError::LengthMismatch { expected, got: len });
    }
    Ok(())
}

impl Frame {
    pub fn new(size: Vec2<usize>, format: PixelFormat, pixels: Pixels) -> Result<Self, FrameError> {
        match (&pixels, format.is_float()) {
            (Pixels::U8(_), false) | (Pixels::F32(_), true) => {}
            _ => {
                return Err(FrameError::Format {
                    expected: "storage matching the pixel format",
                    got: format,
                });
            }
        }
        check_size(size, format.channels(), pixels.len())?;
        Ok(Self {
            size,
            format,
            pixels,
        })
    }

    pub fn from_u8(size: Vec2<usize>, format: PixelFormat, data: Vec<u8>) -> Result<Self, FrameError> {
        Self::new(size, format, Pixels::U8(data))
    }

    pub fn from_f32(size: Vec2<usize>, data: Vec<f32>) -> Result<Self, FrameError> {
        Self::new(size, PixelFormat::LumaF32, Pixels::F32(data))
    }

    /// A frame with every byte set to `value` (alpha included).
    pub fn uniform(size: Vec2<usize>, format: PixelFormat, value: u8) -> Result<Self, FrameError> {
        if format.is_float() {
            let len = size.area();
            return Self::from_f32(size, vec![value as f32 / 255.0; len]);
        }
        let len = size.area() * format.channels();
        Self::from_u8(size, format, vec![value; len])
    }

    pub fn size(&self) -> Vec2<usize> {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    pub fn is_landscape(&self) -> bool {
        self.size.x > self.size.y
    }

    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }

    pub fn as_u8(&self) -> Option<&[u8]> {
        match &self.pixels {
            Pixels::U8(data) => Some(data),
            Pixels::F32(_) => None,
        }
    }

    pub fn as_f32(&self) -> Option<&[f32]> {
        match &self.pixels {
            Pixels::F32(data) => Some(data),
            Pixels::U8(_) => None,
        }
    }

    /// Rotate a quarter turn clockwise.
    pub fn rotate_cw(&self) -> Result<Frame, FrameError> {
        self.rotate(Turn::Clockwise)
    }

    /// Rotate a quarter turn counter-clockwise.
    pub fn rotate_ccw(&self) -> Result<Frame, FrameError> {
        self.rotate(Turn::CounterClockwise)
    }

    fn rotate(&self, turn: Turn) -> Result<Frame, FrameError> {
        let size = self.size;
        let pixels = match (&self.pixels, self.format) {
            (Pixels::U8(data), PixelFormat::Rgb8) => {
                Pixels::U8(rotate_buffer::<Rgb<u8>>(size, data.clone(), turn)?)
            }
            (Pixels::U8(data), PixelFormat::Rgba8) => {
                Pixels::U8(rotate_buffer::<Rgba<u8>>(size, data.clone(), turn)?)
            }
            (Pixels::U8(data), _) => Pixels::U8(rotate_buffer::<Luma<u8>>(size, data.clone(), turn)?),
            (Pixels::F32(data), _) => Pixels::F32(rotate_buffer::<Luma<f32>>(size, data.clone(), turn)?),
        };
        Frame::new(size.transposed(), self.format, pixels)
    }
}

#[derive(Clone, Copy)]
enum Turn {
    Clockwise,
    CounterClockwise,
}

fn to_buffer<P>(size: Vec2<usize>, data: Vec<P::Subpixel>) -> Result<ImageBuffer<P, Vec<P::Subpixel>>, FrameError>
where
    P: Pixel + 'static,
{
    let got = data.len();
    ImageBuffer::from_raw(size.x as u32, size.y as u32, data).ok_or(FrameError::LengthMismatch {
        expected: size.area() * P::CHANNEL_COUNT as usize,
        got,
    })
}

fn rotate_buffer<P>(size: Vec2<usize>, data: Vec<P::Subpixel>, turn: Turn) -> Result<Vec<P::Subpixel>, FrameError>
where
    P: Pixel + 'static,
{
    let buffer = to_buffer::<P>(size, data)?;
    let rotated = match turn {
        Turn::Clockwise => imageops::rotate90(&buffer),
        Turn::CounterClockwise => imageops::rotate270(&buffer),
    };
    Ok(rotated.into_raw())
}

/// Resize a single-channel buffer with bilinear (triangle) filtering.
pub(crate) fn resize_buffer<P>(
    size: Vec2<usize>,
    data: Vec<P::Subpixel>,
    target: Vec2<usize>,
) -> Result<Vec<P::Subpixel>, FrameError>
where
    P: Pixel + 'static,
{
    if target.x == 0 || target.y == 0 {
        return Err(FrameError::ZeroSize(target));
    }
    if size == target {
        return Ok(data);
    }
    let buffer = to_buffer::<P>(size, data)?;
    let resized = imageops::resize(
        &buffer,
        target.x as u32,
        target.y as u32,
        imageops::FilterType::Triangle,
    );
    Ok(resized.into_raw())
}
