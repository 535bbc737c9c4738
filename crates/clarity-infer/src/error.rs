use {crate::Device, std::fmt};

/// Failure to bring a model up. Fatal at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    Malformed(String),
    UnsupportedOp(String),
    UnsupportedDevice(Device),
    /// The graph declares shapes other than the requested contract.
    ContractMismatch(String),
    Io(String),
    Runtime(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Malformed(msg) => write!(f, "malformed model: {msg}"),
            LoadError::UnsupportedOp(msg) => write!(f, "unsupported operator: {msg}"),
            LoadError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            LoadError::ContractMismatch(msg) => write!(f, "shape contract mismatch: {msg}"),
            LoadError::Io(msg) => write!(f, "io error: {msg}"),
            LoadError::Runtime(msg) => write!(f, "runtime error: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err.to_string())
    }
}

/// Failure of a single inference call. Never fatal for the process.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    ShapeMismatch { expected: Vec<usize>, got: Vec<usize> },
    Backend(String),
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceError::ShapeMismatch { expected, got } => {
                write!(f, "input shape mismatch: expected {expected:?}, got {got:?}")
            }
            InferenceError::Backend(msg) => write!(f, "backend error: {msg}"),
        }
    }
}

impl std::error::Error for InferenceError {}

impl From<clarity_base::TensorError> for InferenceError {
    fn from(err: clarity_base::TensorError) -> Self {
        InferenceError::Backend(err.to_string())
    }
}
