use crate::config::DEFAULT_DECIMATION;

/// Decides which frames are worth enhancing: every Nth frame, and only if it
/// is blurrier than the threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameGate {
    decimation: u64,
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new(DEFAULT_DECIMATION)
    }
}

impl FrameGate {
    /// A decimation of 0 samples nothing; configuration validation rejects it.
    pub fn new(decimation: u64) -> Self {
        Self { decimation }
    }

    pub fn decimation(&self) -> u64 {
        self.decimation
    }

    pub fn is_sampled(&self, frame_index: u64) -> bool {
        self.decimation != 0 && frame_index % self.decimation == 0
    }

    /// Low sharpness triggers enhancement. NaN scores never pass.
    pub fn should_process(&self, frame_index: u64, score: f64, threshold: f64) -> bool {
        self.is_sampled(frame_index) && score < threshold
    }
}
