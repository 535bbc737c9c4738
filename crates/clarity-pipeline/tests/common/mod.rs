#![allow(dead_code)]

use {
    clarity_base::{Tensor, Vec2},
    clarity_image::{RawFormat, RawFrame},
    clarity_infer::{InferenceError, Model, ModelContract, ModelHandle},
    std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    },
};

/// Nearest-neighbour upscale by the contract's scale factor.
pub struct NearestUpscale {
    pub contract: ModelContract,
}

impl Model for NearestUpscale {
    fn contract(&self) -> &ModelContract {
        &self.contract
    }

    fn run(&self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferenceError> {
        let in_size = self.contract.input_size();
        let out_size = self.contract.output_size();
        let scale_x = out_size.x / in_size.x;
        let scale_y = out_size.y / in_size.y;
        let mut data = Vec::with_capacity(out_size.area());
        for y in 0..out_size.y {
            for x in 0..out_size.x {
                data.push(input.data[(y / scale_y) * in_size.x + x / scale_x]);
            }
        }
        Ok(Tensor::new(self.contract.output.to_vec(), data)?)
    }
}

/// Correct shape, but one value is NaN.
pub struct NanModel {
    pub contract: ModelContract,
}

impl Model for NanModel {
    fn contract(&self) -> &ModelContract {
        &self.contract
    }

    fn run(&self, _input: &Tensor<f32>) -> Result<Tensor<f32>, InferenceError> {
        let mut output = Tensor::<f32>::zeros(self.contract.output.to_vec())?;
        output.data[0] = f32::NAN;
        Ok(output)
    }
}

/// Returns its input unchanged, so the output is never upscaled.
pub struct EchoModel {
    pub contract: ModelContract,
}

impl Model for EchoModel {
    fn contract(&self) -> &ModelContract {
        &self.contract
    }

    fn run(&self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferenceError> {
        Ok(Tensor::new(input.shape.clone(), input.data.clone())?)
    }
}

/// Counts calls and optionally takes its time.
pub struct CountingModel {
    pub inner: NearestUpscale,
    pub calls: Arc<AtomicUsize>,
    pub delay: Duration,
}

impl Model for CountingModel {
    fn contract(&self) -> &ModelContract {
        self.inner.contract()
    }

    fn run(&self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.inner.run(input)
    }
}

/// A small contract so tests stay fast: 32x24 in, 64x48 out.
pub fn small_contract() -> ModelContract {
    ModelContract::super_resolution(Vec2::new(32, 24), 2)
}

pub fn nearest(contract: ModelContract) -> ModelHandle {
    ModelHandle::new(NearestUpscale { contract })
}

pub fn counting(contract: ModelContract, delay: Duration) -> (ModelHandle, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let model = CountingModel {
        inner: NearestUpscale { contract },
        calls: Arc::clone(&calls),
        delay,
    };
    (ModelHandle::new(model), calls)
}

pub fn gray_raw(width: usize, height: usize, value: u8) -> RawFrame {
    let mut data = Vec::with_capacity(width * height * 4);
    for _ in 0..width * height {
        data.extend_from_slice(&[value, value, value, 255]);
    }
    RawFrame::new(Vec2::new(width, height), RawFormat::Rgba8, data)
}

/// One-pixel black and white checkerboard, as sharp as it gets.
pub fn checkerboard_raw(width: usize, height: usize) -> RawFrame {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let value = if (x + y) % 2 == 0 { 0 } else { 255 };
            data.extend_from_slice(&[value, value, value]);
        }
    }
    RawFrame::new(Vec2::new(width, height), RawFormat::Rgb8, data)
}
