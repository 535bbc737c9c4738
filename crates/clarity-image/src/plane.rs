use {
    crate::*,
    clarity_base::Vec2,
    crates_image::Luma,
};

/// A single-channel image plane, row-major.
#[derive(Clone, PartialEq)]
pub struct Plane<T> {
    size: Vec2<usize>,
    data: Vec<T>,
}

impl<T> std::fmt::Debug for Plane<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plane").field("size", &self.size).finish()
    }
}

impl<T> Plane<T> {
    pub fn new(size: Vec2<usize>, data: Vec<T>) -> Result<Self, FrameError> {
        crate::frame::check_size(size, 1, data.len())?;
        Ok(Self { size, data })
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

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.size.x && y < self.size.y {
            self.data.get(y * self.size.x + x)
        } else {
            None
        }
    }
}

impl Plane<u8> {
    pub fn resize(self, target: Vec2<usize>) -> Result<Plane<u8>, FrameError> {
        let data = crate::frame::resize_buffer::<Luma<u8>>(self.size, self.data, target)?;
        Plane::new(target, data)
    }

    /// Map `0..=255` onto `0.0..=1.0`.
    pub fn to_unit_f32(&self) -> Plane<f32> {
        Plane {
            size: self.size,
            data: self.data.iter().map(|&v| v as f32 / 255.0).collect(),
        }
    }
}

impl Plane<f32> {
    /// Quantize unit-range values to bytes, rounding to nearest and saturating.
    pub fn to_u8(&self) -> Plane<u8> {
        Plane {
            size: self.size,
            data: self
                .data
                .iter()
                .map(|&v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
                .collect(),
        }
    }
}
