use crate::{LoadError, ModelContract, ModelHandle, ModelSource};

/// An inference runtime able to turn a serialized model into a `ModelHandle`.
pub trait Backend {
    fn name(&self) -> &str;
    fn load_model(&self, model: ModelSource, contract: ModelContract) -> Result<ModelHandle, LoadError>;
}
