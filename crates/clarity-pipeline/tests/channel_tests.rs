mod common;

use {
    clarity_base::Vec2,
    clarity_image::{Frame, FrameError, PixelFormat},
    clarity_infer::{InferenceError, ModelContract, ModelHandle},
    clarity_pipeline::{ChannelPipeline, PipelineError, channel::normalize_output},
    common::*,
};

fn gray_frame(width: usize, height: usize, value: u8) -> Frame {
    gray_raw(width, height, value).into_frame().unwrap()
}

#[test]
fn test_output_is_model_output_size() {
    let pipeline = ChannelPipeline::new(nearest(small_contract()));
    for (width, height) in [(48, 64), (64, 48), (30, 30), (7, 5), (200, 100)] {
        let out = pipeline.enhance(&gray_frame(width, height, 90)).unwrap();
        assert_eq!(out.size(), Vec2::new(64, 48), "input {width}x{height}");
        assert_eq!(out.format(), PixelFormat::Rgba8);
    }
}

#[test]
fn test_default_contract_output_is_640x480() {
    let pipeline = ChannelPipeline::new(nearest(ModelContract::default()));
    let out = pipeline.enhance(&gray_frame(480, 640, 128)).unwrap();
    assert_eq!(out.size(), Vec2::new(640, 480));
}

#[test]
fn test_uniform_gray_survives_enhancement() {
    let pipeline = ChannelPipeline::new(nearest(small_contract()));
    let out = pipeline.enhance(&gray_frame(48, 64, 128)).unwrap();
    for px in out.as_u8().unwrap().chunks_exact(4) {
        for &c in &px[..3] {
            assert!(c.abs_diff(128) <= 2, "{px:?}");
        }
        assert_eq!(px[3], 255);
    }
}

#[test]
fn test_chroma_is_upscaled_with_luma() {
    // left half reddish, right half bluish; the color split survives
    let (width, height) = (24, 32);
    let mut data = Vec::with_capacity(width * height * 3);
    for _ in 0..height {
        for x in 0..width {
            if x < width / 2 {
                data.extend_from_slice(&[180, 90, 90]);
            } else {
                data.extend_from_slice(&[90, 90, 180]);
            }
        }
    }
    let frame = Frame::from_u8(Vec2::new(width, height), PixelFormat::Rgb8, data).unwrap();
    let out = ChannelPipeline::new(nearest(small_contract())).enhance(&frame).unwrap();
    let pixels = out.as_u8().unwrap();
    let left = &pixels[(10 * 64 + 4) * 4..][..4];
    let right = &pixels[(10 * 64 + 60) * 4..][..4];
    assert!(left[0] > left[2], "left {left:?}");
    assert!(right[2] > right[0], "right {right:?}");
}

#[test]
fn test_landscape_frame_is_rotated_clockwise() {
    // 64x48 with a bright left column; after a clockwise turn it becomes the
    // top row of a 48x64 frame, which lands at the top of the output
    let (width, height) = (64, 48);
    let mut data = vec![20u8; width * height * 3];
    for y in 0..height {
        for x in 0..4 {
            data[(y * width + x) * 3..][..3].copy_from_slice(&[230, 230, 230]);
        }
    }
    let frame = Frame::from_u8(Vec2::new(width, height), PixelFormat::Rgb8, data).unwrap();
    let model = nearest(ModelContract::super_resolution(Vec2::new(48, 64), 1));
    let out = ChannelPipeline::new(model).enhance(&frame).unwrap();
    assert_eq!(out.size(), Vec2::new(48, 64));
    let pixels = out.as_u8().unwrap();
    let top = pixels[(48 / 2) * 4];
    let bottom = pixels[(63 * 48 + 48 / 2) * 4];
    assert!(top > 200, "top {top}");
    assert!(bottom < 50, "bottom {bottom}");
}

#[test]
fn test_tall_frame_is_not_rotated() {
    // 48x64 with a bright left column stays bright on the left
    let (width, height) = (48, 64);
    let mut data = vec![20u8; width * height * 3];
    for y in 0..height {
        for x in 0..4 {
            data[(y * width + x) * 3..][..3].copy_from_slice(&[230, 230, 230]);
        }
    }
    let frame = Frame::from_u8(Vec2::new(width, height), PixelFormat::Rgb8, data).unwrap();
    let model = nearest(ModelContract::super_resolution(Vec2::new(48, 64), 1));
    let out = ChannelPipeline::new(model).enhance(&frame).unwrap();
    assert_eq!(out.size(), Vec2::new(48, 64));
    let pixels = out.as_u8().unwrap();
    let left = pixels[(32 * 48) * 4];
    let right = pixels[(32 * 48 + 47) * 4];
    assert!(left > 200, "left {left}");
    assert!(right < 50, "right {right}");
}

#[test]
fn test_nan_output_fails_whole_frame() {
    let model = ModelHandle::new(NanModel {
        contract: small_contract(),
    });
    let result = ChannelPipeline::new(model).enhance(&gray_frame(48, 64, 10));
    assert_eq!(result.unwrap_err(), PipelineError::NaNOutput);
}

#[test]
fn test_wrong_output_shape_is_reported() {
    let model = ModelHandle::new(EchoModel {
        contract: small_contract(),
    });
    let err = ChannelPipeline::new(model)
        .enhance(&gray_frame(48, 64, 10))
        .unwrap_err();
    assert_eq!(
        err,
        PipelineError::UnexpectedOutputShape {
            expected: vec![1, 1, 48, 64],
            got: vec![1, 1, 24, 32],
        }
    );
    assert!(err.is_shape_contract());
}

#[test]
fn test_non_color_frame_is_rejected() {
    let frame = Frame::uniform(Vec2::new(8, 8), PixelFormat::Luma8, 3).unwrap();
    let err = ChannelPipeline::new(nearest(small_contract()))
        .enhance(&frame)
        .unwrap_err();
    assert!(matches!(err, PipelineError::Frame(FrameError::Format { .. })));
    assert!(!err.is_shape_contract());
}

#[test]
fn test_input_shape_mismatch_is_shape_contract() {
    let err = PipelineError::Inference(InferenceError::ShapeMismatch {
        expected: vec![1, 1, 240, 320],
        got: vec![1, 1, 320, 240],
    });
    assert!(err.is_shape_contract());
    assert!(!PipelineError::Inference(InferenceError::Backend("boom".into())).is_shape_contract());
}

#[test]
fn test_normalize_output_stretches_range() {
    let plane = normalize_output(vec![-2.0, 0.0, 2.0, 6.0], Vec2::new(2, 2)).unwrap();
    assert_eq!(plane.data(), &[0, 64, 128, 255]);
}

#[test]
fn test_normalize_constant_output_clamps() {
    let plane = normalize_output(vec![0.5; 4], Vec2::new(2, 2)).unwrap();
    assert_eq!(plane.data(), &[128; 4]);
    let plane = normalize_output(vec![7.0; 4], Vec2::new(2, 2)).unwrap();
    assert_eq!(plane.data(), &[255; 4]);
}

#[test]
fn test_normalize_rejects_non_finite() {
    for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        let result = normalize_output(vec![0.0, bad, 1.0, 0.5], Vec2::new(2, 2));
        assert_eq!(result.unwrap_err(), PipelineError::NaNOutput);
    }
}

#[test]
fn test_normalize_rejects_wrong_length() {
    let err = normalize_output(vec![0.0; 3], Vec2::new(2, 2)).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyIntermediate { .. }));
}

#[test]
fn test_input_frame_is_untouched() {
    let frame = gray_frame(40, 30, 60);
    let before = frame.clone();
    ChannelPipeline::new(nearest(small_contract()))
        .enhance(&frame)
        .unwrap();
    assert_eq!(frame, before);
}

/// Tall 480x640 frame, bright in the leftmost 32 columns.
fn tall_frame_with_bright_left_edge() -> Frame {
    let (width, height) = (480, 640);
    let mut data = vec![20u8; width * height * 3];
    for y in 0..height {
        for x in 0..32 {
            data[(y * width + x) * 3..][..3].copy_from_slice(&[230, 230, 230]);
        }
    }
    Frame::from_u8(Vec2::new(width, height), PixelFormat::Rgb8, data).unwrap()
}

fn red_at(frame: &Frame, x: usize, y: usize) -> u8 {
    frame.as_u8().unwrap()[(y * frame.width() + x) * 4]
}

#[test]
fn test_rerun_turns_by_aspect_only() {
    let pipeline = ChannelPipeline::new(nearest(ModelContract::default()));

    // tall input keeps its orientation: the bright edge stays on the left
    let first = pipeline.enhance(&tall_frame_with_bright_left_edge()).unwrap();
    assert_eq!(first.size(), Vec2::new(640, 480));
    assert!(red_at(&first, 5, 240) > 200);
    assert!(red_at(&first, 600, 240) < 50);
    assert!(red_at(&first, 320, 5) < 50);

    // the 640x480 result is landscape, so a second pass turns it exactly
    // one quarter clockwise: the left edge becomes the top edge
    let second = pipeline.enhance(&first).unwrap();
    assert_eq!(second.size(), Vec2::new(640, 480));
    assert!(red_at(&second, 320, 5) > 200);
    assert!(red_at(&second, 320, 470) < 50);
    assert!(red_at(&second, 5, 240) < 50);
}
