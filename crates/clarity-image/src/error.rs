use {
    crate::PixelFormat,
    clarity_base::Vec2,
    std::fmt,
};

/// A buffer that violates the frame/plane invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    ZeroSize(Vec2<usize>),
    LengthMismatch { expected: usize, got: usize },
    Format { expected: &'static str, got: PixelFormat },
    SizeMismatch { expected: Vec2<usize>, got: Vec2<usize> },
    OddWidth(usize),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::ZeroSize(size) => write!(f, "zero-sized buffer ({size})"),
            FrameError::LengthMismatch { expected, got } => {
                write!(f, "buffer length mismatch: expected {expected}, got {got}")
            }
            FrameError::Format { expected, got } => {
                write!(f, "unsupported pixel format: expected {expected}, got {got:?}")
            }
            FrameError::SizeMismatch { expected, got } => {
                write!(f, "size mismatch: expected {expected}, got {got}")
            }
            FrameError::OddWidth(width) => write!(f, "packed 4:2:2 needs an even width, got {width}"),
        }
    }
}

impl std::error::Error for FrameError {}

#[derive(Debug)]
pub enum ImageError {
    Decode(String),
    Encode(String),
    Io(String),
    Frame(FrameError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Decode(msg) => write!(f, "decode error: {msg}"),
            ImageError::Encode(msg) => write!(f, "encode error: {msg}"),
            ImageError::Io(msg) => write!(f, "io error: {msg}"),
            ImageError::Frame(err) => write!(f, "frame error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<FrameError> for ImageError {
    fn from(err: FrameError) -> Self {
        ImageError::Frame(err)
    }
}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for ImageError {
    fn from(err: std::io::Error) -> Self {
        ImageError::Io(err.to_string())
    }
}
