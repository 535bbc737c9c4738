use {
    crate::{Backend, Device, InferenceError, LoadError, Model, ModelContract, ModelHandle, ModelSource},
    clarity_base::Tensor,
    ndarray::ArrayD,
    ort::{
        inputs,
        session::Session as OrtSession,
        value::{TensorRef, ValueType},
    },
    std::sync::{Mutex, OnceLock},
};

static ORT_INIT: OnceLock<()> = OnceLock::new();

fn ensure_ort_init() {
    ORT_INIT.get_or_init(|| {
        let _ = ort::init().with_name("clarity").commit();
    });
}

/// Compare a shape declared by the graph with the contract's fixed shape.
///
/// Negative dimensions are symbolic (dynamic) and accept any size.
pub fn check_declared_shape(role: &str, declared: &[i64], expected: &[usize]) -> Result<(), LoadError> {
    let matches = declared.len() == expected.len()
        && declared
            .iter()
            .zip(expected)
            .all(|(&dim, &want)| dim < 0 || dim as u64 == want as u64);
    if matches {
        Ok(())
    } else {
        Err(LoadError::ContractMismatch(format!(
            "{role} declared as {declared:?}, expected {expected:?}"
        )))
    }
}

/// Sort an onnxruntime load failure into the model error taxonomy.
///
/// onnxruntime reports operators without a kernel as `NOT_IMPLEMENTED`
/// ("Could not find an implementation for ..."); everything else that fails
/// while parsing or resolving the graph is treated as a malformed model.
pub fn classify_load_error(message: &str) -> LoadError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("not_implemented")
        || lower.contains("could not find an implementation")
        || lower.contains("unsupported op")
        || lower.contains("no opset import for domain")
    {
        LoadError::UnsupportedOp(message.to_string())
    } else {
        LoadError::Malformed(message.to_string())
    }
}

pub struct OnnxBackend {
    device: Device,
}

impl OnnxBackend {
    pub fn new(device: Device) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}

impl Default for OnnxBackend {
    fn default() -> Self {
        Self::new(Device::Cpu)
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: ModelSource, contract: ModelContract) -> Result<ModelHandle, LoadError> {
        ensure_ort_init();

        let bytes = model.into_bytes()?;
        log::info!("loading ONNX model ({} bytes) on {}", bytes.len(), self.device);

        let builder = OrtSession::builder()
            .map_err(|e| LoadError::Runtime(format!("failed to create session builder: {}", e)))?;

        let mut builder = match &self.device {
            Device::Cpu => builder,
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => builder
                .with_execution_providers([
                    ort::execution_providers::CUDAExecutionProvider::default()
                        .with_device_id(*device_id)
                        .build(),
                    ort::execution_providers::CPUExecutionProvider::default().build(),
                ])
                .map_err(|_| LoadError::UnsupportedDevice(self.device.clone()))?,
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => return Err(LoadError::UnsupportedDevice(self.device.clone())),
        };

        let session = builder
            .commit_from_memory(&bytes)
            .map_err(|e| classify_load_error(&e.to_string()))?;

        if session.inputs().len() != 1 || session.outputs().is_empty() {
            return Err(LoadError::ContractMismatch(format!(
                "expected one input and at least one output, graph has {} and {}",
                session.inputs().len(),
                session.outputs().len()
            )));
        }
        let input_dims = match session.inputs()[0].dtype() {
            ValueType::Tensor { shape, .. } => shape.to_vec(),
            other => return Err(LoadError::ContractMismatch(format!("input is not a tensor: {other:?}"))),
        };
        let output_dims = match session.outputs()[0].dtype() {
            ValueType::Tensor { shape, .. } => shape.to_vec(),
            other => return Err(LoadError::ContractMismatch(format!("output is not a tensor: {other:?}"))),
        };
        check_declared_shape("input", &input_dims, &contract.input)?;
        check_declared_shape("output", &output_dims, &contract.output)?;

        log::info!(
            "model ready: input {:?}, expected output {:?}",
            contract.input,
            contract.output
        );
        Ok(ModelHandle::new(OnnxModel {
            session: Mutex::new(session),
            contract,
        }))
    }
}

/// An onnxruntime session bound to a fixed shape contract.
///
/// onnxruntime needs exclusive access per run; calls are serialized here.
pub struct OnnxModel {
    session: Mutex<OrtSession>,
    contract: ModelContract,
}

impl Model for OnnxModel {
    fn contract(&self) -> &ModelContract {
        &self.contract
    }

    fn run(&self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferenceError> {
        let array = tensor_to_ndarray(input)?;
        let tensor_ref = TensorRef::from_array_view(array.view())
            .map_err(|e| InferenceError::Backend(format!("failed to create tensor ref: {}", e)))?;

        let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        let outputs = session
            .run(inputs![tensor_ref])
            .map_err(|e| InferenceError::Backend(format!("inference failed: {}", e)))?;

        let output = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| InferenceError::Backend(format!("output is not f32: {}", e)))?;
        ndarray_to_tensor(output)
    }
}

/// Copy a `Tensor<f32>` into an owned dynamic-rank ndarray.
pub fn tensor_to_ndarray(tensor: &Tensor<f32>) -> Result<ArrayD<f32>, InferenceError> {
    ArrayD::from_shape_vec(tensor.shape.clone(), tensor.data.clone())
        .map_err(|e| InferenceError::Backend(format!("failed to create ndarray from tensor: {}", e)))
}

/// Copy an ndarray view (any memory order) into a row-major `Tensor<f32>`.
pub fn ndarray_to_tensor(array: ndarray::ArrayView<'_, f32, ndarray::IxDyn>) -> Result<Tensor<f32>, InferenceError> {
    let shape = array.shape().to_vec();
    let data = array.iter().copied().collect();
    Ok(Tensor::new(shape, data)?)
}
