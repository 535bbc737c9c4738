pub mod backend;
pub mod backends;
pub mod device;
pub mod error;
pub mod model;
pub mod modelsource;

pub use backend::Backend;
pub use backends::OnnxBackend;
pub use device::Device;
pub use error::{InferenceError, LoadError};
pub use model::{Model, ModelContract, ModelHandle};
pub use modelsource::ModelSource;

/// Load an ONNX super-resolution model from memory on the CPU with the
/// default 320x240 -> 640x480 contract.
pub fn load(model_bytes: Vec<u8>) -> Result<ModelHandle, LoadError> {
    OnnxBackend::new(Device::Cpu).load_model(ModelSource::Memory(model_bytes), ModelContract::default())
}
