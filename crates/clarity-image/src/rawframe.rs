use {crate::*, clarity_base::Vec2};

/// A frame exactly as handed over by a capture source.
#[derive(Clone)]
pub struct RawFrame {
    pub size: Vec2<usize>,
    pub format: RawFormat,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for RawFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawFrame")
            .field("size", &self.size)
            .field("format", &self.format)
            .field("len", &self.data.len())
            .finish()
    }
}

impl RawFrame {
    pub fn new(size: Vec2<usize>, format: RawFormat, data: Vec<u8>) -> Self {
        Self { size, format, data }
    }

    /// Convert to the internal interleaved representation.
    ///
    /// RGB and RGBA buffers are taken over as-is; YUYV is decoded to `Rgb8`.
    pub fn into_frame(self) -> Result<Frame, FrameError> {
        if self.size.x == 0 || self.size.y == 0 {
            return Err(FrameError::ZeroSize(self.size));
        }
        let expected = self
            .format
            .buffer_len(self.size.x, self.size.y)
            .ok_or(FrameError::LengthMismatch {
                expected: usize::MAX,
                got: self.data.len(),
            })?;
        if expected != self.data.len() {
            return Err(FrameError::LengthMismatch {
                expected,
                got: self.data.len(),
            });
        }
        match self.format {
            RawFormat::Rgb8 => Frame::from_u8(self.size, PixelFormat::Rgb8, self.data),
            RawFormat::Rgba8 => Frame::from_u8(self.size, PixelFormat::Rgba8, self.data),
            RawFormat::Yuyv => {
                let rgb = convert::yuyv_to_rgb(&self.data, self.size)
                    .ok_or(FrameError::OddWidth(self.size.x))?;
                Frame::from_u8(self.size, PixelFormat::Rgb8, rgb)
            }
        }
    }
}
