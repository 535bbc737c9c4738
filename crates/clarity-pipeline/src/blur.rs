use {
    clarity_base::Vec2,
    clarity_image::{Frame, convert},
};

/// Sharpness metric: variance of the Laplacian of the frame's luminance.
///
/// Sharp frames have strong edges and therefore a wide spread of second
/// derivative responses; blurry or flat frames score low. Flat fields score 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlurScorer;

impl BlurScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a frame. Never fails; frames without usable luminance score 0.0.
    pub fn score(&self, frame: &Frame) -> f64 {
        match convert::luma(frame) {
            Ok(plane) => laplacian_variance(plane.size(), plane.data()),
            Err(err) => {
                log::warn!("cannot score {:?}: {}", frame, err);
                0.0
            }
        }
    }
}

// gfedcb|abcdefgh|gfedcba
fn reflect101(i: isize, len: usize) -> usize {
    let len = len as isize;
    if len == 1 {
        return 0;
    }
    let i = if i < 0 { -i } else { i };
    let i = if i >= len { 2 * (len - 1) - i } else { i };
    i as usize
}

/// Population variance of the 4-neighbour Laplacian `[0 1 0; 1 -4 1; 0 1 0]`
/// over a single-channel 8-bit plane, with reflect-101 borders.
///
/// Returns 0.0 for empty input or when `luma` is shorter than `size` implies.
pub fn laplacian_variance(size: Vec2<usize>, luma: &[u8]) -> f64 {
    let (width, height) = (size.x, size.y);
    let n = match size.checked_area() {
        Some(n) if n > 0 && luma.len() >= n => n,
        _ => return 0.0,
    };

    let at = |x: isize, y: isize| -> i64 {
        luma[reflect101(y, height) * width + reflect101(x, width)] as i64
    };

    // responses are bounded by 4 * 255, so integer sums stay exact
    let mut sum: i128 = 0;
    let mut sum_sq: i128 = 0;
    for y in 0..height as isize {
        for x in 0..width as isize {
            let response = at(x, y - 1) + at(x - 1, y) + at(x + 1, y) + at(x, y + 1) - 4 * at(x, y);
            sum += response as i128;
            sum_sq += (response * response) as i128;
        }
    }

    let n = n as i128;
    let numerator = n * sum_sq - sum * sum;
    (numerator as f64 / (n * n) as f64).max(0.0)
}
