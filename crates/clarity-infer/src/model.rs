use {
    crate::InferenceError,
    clarity_base::{Tensor, Vec2},
    std::{fmt, sync::Arc},
};

/// Fixed NCHW input and output shapes of a single-channel model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelContract {
    pub input: [usize; 4],
    pub output: [usize; 4],
}

impl ModelContract {
    /// A 1-channel super-resolution network taking `input` (width x height)
    /// and producing `scale` times as many pixels along each axis.
    ///
    /// Output extents saturate at `usize::MAX`; use `checked_super_resolution`
    /// for sizes that come from outside.
    pub fn super_resolution(input: Vec2<usize>, scale: usize) -> Self {
        Self::checked_super_resolution(input, scale).unwrap_or(Self {
            input: [1, 1, input.y, input.x],
            output: [1, 1, input.y.saturating_mul(scale), input.x.saturating_mul(scale)],
        })
    }

    /// Like `super_resolution`, but `None` when the output extent or its
    /// pixel count does not fit in `usize`.
    pub fn checked_super_resolution(input: Vec2<usize>, scale: usize) -> Option<Self> {
        let output = input.checked_scaled(scale)?;
        output.checked_area()?;
        Some(Self {
            input: [1, 1, input.y, input.x],
            output: [1, 1, output.y, output.x],
        })
    }

    pub fn input_size(&self) -> Vec2<usize> {
        Vec2::new(self.input[3], self.input[2])
    }

    pub fn output_size(&self) -> Vec2<usize> {
        Vec2::new(self.output[3], self.output[2])
    }
}

impl Default for ModelContract {
    /// FSRCNN x2: [1, 1, 240, 320] in, [1, 1, 480, 640] out.
    fn default() -> Self {
        Self::super_resolution(Vec2::new(320, 240), 2)
    }
}

/// A loaded, immutable inference graph.
///
/// Implementations must be pure: equal inputs give equal outputs, and the
/// input is never mutated.
pub trait Model: Send + Sync {
    fn contract(&self) -> &ModelContract;
    fn run(&self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferenceError>;
}

/// Shared read-only reference to a loaded model.
///
/// Cloning is cheap; every clone refers to the same graph.
#[derive(Clone)]
pub struct ModelHandle {
    model: Arc<dyn Model>,
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("contract", self.model.contract())
            .finish()
    }
}

impl ModelHandle {
    pub fn new(model: impl Model + 'static) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    pub fn contract(&self) -> &ModelContract {
        self.model.contract()
    }

    /// Run the model after checking `input` against the contract's input shape.
    ///
    /// The output shape is whatever the graph produced; callers validate it.
    pub fn infer(&self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferenceError> {
        let expected = &self.contract().input;
        if input.shape.as_slice() != expected.as_slice() {
            return Err(InferenceError::ShapeMismatch {
                expected: expected.to_vec(),
                got: input.shape.clone(),
            });
        }
        self.model.run(input)
    }
}
