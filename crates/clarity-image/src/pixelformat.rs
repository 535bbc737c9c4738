/// Layout of a decoded `Frame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
    Luma8,
    LumaF32,
}

impl PixelFormat {
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
            PixelFormat::Luma8 | PixelFormat::LumaF32 => 1,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, PixelFormat::LumaF32)
    }

    pub fn is_color(&self) -> bool {
        matches!(self, PixelFormat::Rgb8 | PixelFormat::Rgba8)
    }
}

/// Layout of a frame as delivered by a capture source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawFormat {
    Rgb8,
    Rgba8,
    /// Packed YCbCr 4:2:2, `[Y0, U, Y1, V]` per pixel pair.
    Yuyv,
}

impl RawFormat {
    /// Expected buffer length for a `width` x `height` frame.
    pub fn buffer_len(&self, width: usize, height: usize) -> Option<usize> {
        let pixels = width.checked_mul(height)?;
        match self {
            RawFormat::Rgb8 => pixels.checked_mul(3),
            RawFormat::Rgba8 => pixels.checked_mul(4),
            RawFormat::Yuyv => pixels.checked_mul(2),
        }
    }
}
