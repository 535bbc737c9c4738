use {
    clarity_image::FrameError,
    clarity_infer::InferenceError,
    std::fmt,
};

/// Why enhancing one frame failed. Never outlives that frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    UnexpectedOutputShape { expected: Vec<usize>, got: Vec<usize> },
    NaNOutput,
    EmptyIntermediate { stage: &'static str, reason: String },
    Inference(InferenceError),
    Frame(FrameError),
}

impl PipelineError {
    /// The model and the frame disagree on tensor shapes.
    pub fn is_shape_contract(&self) -> bool {
        matches!(
            self,
            PipelineError::UnexpectedOutputShape { .. }
                | PipelineError::Inference(InferenceError::ShapeMismatch { .. })
        )
    }

    pub(crate) fn at(stage: &'static str) -> impl FnOnce(FrameError) -> PipelineError {
        move |err| PipelineError::EmptyIntermediate {
            stage,
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::UnexpectedOutputShape { expected, got } => {
                write!(f, "unexpected model output shape: expected {expected:?}, got {got:?}")
            }
            PipelineError::NaNOutput => write!(f, "model output contains NaN"),
            PipelineError::EmptyIntermediate { stage, reason } => {
                write!(f, "invalid intermediate at {stage}: {reason}")
            }
            PipelineError::Inference(err) => write!(f, "inference error: {err}"),
            PipelineError::Frame(err) => write!(f, "frame error: {err}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<InferenceError> for PipelineError {
    fn from(err: InferenceError) -> Self {
        PipelineError::Inference(err)
    }
}

impl From<FrameError> for PipelineError {
    fn from(err: FrameError) -> Self {
        PipelineError::Frame(err)
    }
}

#[derive(Debug)]
pub enum WorkerError {
    NoRuntime,
    Closed,
    Join(String),
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerError::NoRuntime => write!(f, "worker must be spawned inside a tokio runtime"),
            WorkerError::Closed => write!(f, "worker is shut down"),
            WorkerError::Join(msg) => write!(f, "worker thread failed: {msg}"),
        }
    }
}

impl std::error::Error for WorkerError {}
