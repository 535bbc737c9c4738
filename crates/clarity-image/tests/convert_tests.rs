use clarity_base::Vec2;
use clarity_image::convert::{luma, luma_bt601, rgb_to_yuv, yuv_to_rgb, yuyv_to_rgb};
use clarity_image::{Frame, FrameError, PixelFormat, YuvPlanes};

#[test]
fn test_luma_bt601_extremes() {
    assert_eq!(luma_bt601(0, 0, 0), 0);
    assert_eq!(luma_bt601(255, 255, 255), 255);
    assert_eq!(luma_bt601(128, 128, 128), 128);
}

#[test]
fn test_luma_bt601_green_dominates() {
    assert!(luma_bt601(0, 255, 0) > luma_bt601(255, 0, 0));
    assert!(luma_bt601(255, 0, 0) > luma_bt601(0, 0, 255));
}

#[test]
fn test_gray_has_neutral_chroma() {
    assert_eq!(rgb_to_yuv(77, 77, 77), (77, 128, 128));
    assert_eq!(yuv_to_rgb(77, 128, 128), (77, 77, 77));
}

#[test]
fn test_yuv_pixel_round_trip_tolerance() {
    // colors whose V component stays inside 0..=255
    for &(r, g, b) in &[(0, 0, 255), (12, 200, 99), (250, 240, 10), (180, 90, 60), (40, 60, 200)] {
        let (y, u, v) = rgb_to_yuv(r, g, b);
        let (r2, g2, b2) = yuv_to_rgb(y, u, v);
        assert!((r as i32 - r2 as i32).abs() <= 3, "r {r} -> {r2}");
        assert!((g as i32 - g2 as i32).abs() <= 3, "g {g} -> {g2}");
        assert!((b as i32 - b2 as i32).abs() <= 3, "b {b} -> {b2}");
    }
}

#[test]
fn test_luma_of_rgba_frame_ignores_alpha() {
    let frame = Frame::from_u8(Vec2::new(1, 1), PixelFormat::Rgba8, vec![200, 200, 200, 0]).unwrap();
    assert_eq!(luma(&frame).unwrap().data(), &[200]);
}

#[test]
fn test_luma_of_float_frame() {
    let frame = Frame::from_f32(Vec2::new(2, 1), vec![0.0, 1.0]).unwrap();
    assert_eq!(luma(&frame).unwrap().data(), &[0, 255]);
}

#[test]
fn test_split_rejects_luma_frame() {
    let frame = Frame::uniform(Vec2::new(2, 2), PixelFormat::Luma8, 0).unwrap();
    assert!(matches!(YuvPlanes::split(&frame), Err(FrameError::Format { .. })));
}

#[test]
fn test_split_merge_round_trip() {
    let size = Vec2::new(16, 8);
    let mut data = Vec::with_capacity(size.area() * 3);
    for y in 0..size.y {
        for x in 0..size.x {
            data.extend_from_slice(&[(64 + x * 4) as u8, (80 + y * 8) as u8, (100 + (x + y) * 2) as u8]);
        }
    }
    let frame = Frame::from_u8(size, PixelFormat::Rgb8, data.clone()).unwrap();

    let planes = YuvPlanes::split(&frame).unwrap();
    let merged = planes.merge(PixelFormat::Rgb8).unwrap();

    assert_eq!(merged.size(), size);
    for (a, b) in data.iter().zip(merged.as_u8().unwrap()) {
        assert!((*a as i32 - *b as i32).abs() <= 3);
    }
}

#[test]
fn test_merge_rgba_is_opaque() {
    let frame = Frame::uniform(Vec2::new(2, 2), PixelFormat::Rgb8, 50).unwrap();
    let merged = YuvPlanes::split(&frame).unwrap().merge(PixelFormat::Rgba8).unwrap();
    assert!(merged.as_u8().unwrap().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn test_merge_rejects_mismatched_chroma() {
    let frame = Frame::uniform(Vec2::new(4, 4), PixelFormat::Rgb8, 50).unwrap();
    let mut planes = YuvPlanes::split(&frame).unwrap();
    planes.u = planes.u.resize(Vec2::new(2, 2)).unwrap();
    assert!(matches!(
        planes.merge(PixelFormat::Rgb8),
        Err(FrameError::SizeMismatch { .. })
    ));
}

#[test]
fn test_yuyv_to_rgb_too_short() {
    assert!(yuyv_to_rgb(&[0, 0], Vec2::new(2, 1)).is_none());
}
