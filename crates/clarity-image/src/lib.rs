//! Frame buffers and image operations for the clarity pipeline.
//!
//! Interleaved frames are row-major HWC; planes are single-channel.
//! Geometric operations (resize, rotate) go through the `image` crate.

pub mod codec;
pub mod convert;
pub mod error;
mod frame;
mod pixelformat;
mod plane;
mod rawframe;

pub use codec::{decode_image, encode_jpeg, encode_png, load_image};
pub use convert::YuvPlanes;
pub use error::{FrameError, ImageError};
pub use frame::{Frame, Pixels};
pub use pixelformat::{PixelFormat, RawFormat};
pub use plane::Plane;
pub use rawframe::RawFrame;
