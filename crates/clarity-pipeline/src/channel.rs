use {
    crate::PipelineError,
    clarity_base::{Tensor, Vec2},
    clarity_image::{Frame, FrameError, PixelFormat, Plane, YuvPlanes},
    clarity_infer::ModelHandle,
};

/// Luma-only super-resolution of a color frame.
///
/// The model sees only the Y plane; U and V are upscaled with bilinear
/// filtering and recombined with the enhanced luma.
#[derive(Clone)]
pub struct ChannelPipeline {
    model: ModelHandle,
}

impl ChannelPipeline {
    pub fn new(model: ModelHandle) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub fn enhance(&self, frame: &Frame) -> Result<Frame, PipelineError> {
        enhance(frame, &self.model)
    }
}

/// Enhance one frame.
///
/// Landscape frames are turned a quarter clockwise first and the result stays
/// in that orientation. The output is RGBA8 at the model's output size.
pub fn enhance(frame: &Frame, model: &ModelHandle) -> Result<Frame, PipelineError> {
    if !frame.format().is_color() {
        return Err(PipelineError::Frame(FrameError::Format {
            expected: "Rgb8 or Rgba8",
            got: frame.format(),
        }));
    }
    let contract = model.contract();
    let input_size = contract.input_size();
    let output_size = contract.output_size();

    let rotated;
    let upright = if frame.is_landscape() {
        rotated = frame.rotate_cw().map_err(PipelineError::at("orientation"))?;
        &rotated
    } else {
        frame
    };
    log::debug!("enhance: {} -> model {} -> {}", upright.size(), input_size, output_size);

    let YuvPlanes { y, u, v } = YuvPlanes::split(upright).map_err(PipelineError::at("color decomposition"))?;

    let luma = y
        .resize(input_size)
        .map_err(PipelineError::at("luma resize"))?
        .to_unit_f32();
    let input = Tensor::new(contract.input.to_vec(), luma.into_data()).map_err(|err| {
        PipelineError::EmptyIntermediate {
            stage: "tensor assembly",
            reason: err.to_string(),
        }
    })?;

    let output = model.infer(&input)?;
    if output.shape != contract.output {
        return Err(PipelineError::UnexpectedOutputShape {
            expected: contract.output.to_vec(),
            got: output.shape,
        });
    }

    let luma = normalize_output(output.into_data(), output_size)?;

    let u = u.resize(output_size).map_err(PipelineError::at("chroma upscale"))?;
    let v = v.resize(output_size).map_err(PipelineError::at("chroma upscale"))?;

    YuvPlanes { y: luma, u, v }
        .merge(PixelFormat::Rgba8)
        .map_err(PipelineError::at("remerge"))
}

/// Min-max normalize raw model output to `0..=1` and quantize to bytes.
///
/// A constant output has no range to stretch; it is clamped to `0..=1` instead.
pub fn normalize_output(values: Vec<f32>, size: Vec2<usize>) -> Result<Plane<u8>, PipelineError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(PipelineError::NaNOutput);
    }
    let (min, max) = values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    log::debug!("model output range [{min}, {max}]");

    let range = max - min;
    let unit: Vec<f32> = if range > 0.0 {
        values.iter().map(|&v| (v - min) / range).collect()
    } else {
        values.iter().map(|&v| v.clamp(0.0, 1.0)).collect()
    };
    let plane = Plane::new(size, unit).map_err(PipelineError::at("output normalization"))?;
    Ok(plane.to_u8())
}
