use {
    crate::*,
    clarity_image::{Frame, RawFrame},
    clarity_infer::ModelHandle,
    std::time::{Duration, Instant},
};

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Not one of the every-Nth frames.
    NotSampled,
    /// Sharp enough already.
    Sharp { score: f64, threshold: f64 },
    /// Model and frame disagree on tensor shapes.
    ShapeContract(PipelineError),
}

/// Outcome of one frame. Skipped and failed frames are shown unmodified.
#[derive(Debug, Clone)]
pub enum PipelineResult {
    Enhanced(Frame),
    Skipped(SkipReason),
    Failed(PipelineError),
}

impl PipelineResult {
    pub fn is_enhanced(&self) -> bool {
        matches!(self, PipelineResult::Enhanced(_))
    }

    pub fn frame(&self) -> Option<&Frame> {
        match self {
            PipelineResult::Enhanced(frame) => Some(frame),
            _ => None,
        }
    }

    pub fn into_frame(self) -> Option<Frame> {
        match self {
            PipelineResult::Enhanced(frame) => Some(frame),
            _ => None,
        }
    }
}

/// Everything known about one processed frame.
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub index: u64,
    /// `None` when the frame was not sampled or could not be decoded.
    pub blur_score: Option<f64>,
    pub result: PipelineResult,
    /// The enhanced frame is still turned a quarter clockwise and needs a
    /// quarter counter-clockwise turn to be upright.
    pub rotated: bool,
    pub elapsed: Duration,
    /// Frames replaced in the inbound slot since the previous report.
    pub dropped: u64,
}

impl FrameReport {
    pub fn is_enhanced(&self) -> bool {
        self.result.is_enhanced()
    }
}

/// Runs the gate and the channel pipeline for each inbound frame.
pub struct FrameOrchestrator {
    pipeline: ChannelPipeline,
    config: PipelineConfig,
    gate: FrameGate,
    scorer: BlurScorer,
    frame_counter: u64,
}

impl FrameOrchestrator {
    pub fn new(model: ModelHandle, config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if *model.contract() != config.contract() {
            log::warn!(
                "model contract {:?} differs from configured {:?}, using the model's",
                model.contract(),
                config.contract()
            );
        }
        Ok(Self {
            pipeline: ChannelPipeline::new(model),
            gate: FrameGate::new(config.decimation()),
            config,
            scorer: BlurScorer::new(),
            frame_counter: 0,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Number of frames handed to `process_next` so far.
    pub fn frames_seen(&self) -> u64 {
        self.frame_counter
    }

    /// Process the next frame; the first one gets index 1.
    pub fn process_next(&mut self, raw: RawFrame) -> FrameReport {
        self.frame_counter += 1;
        self.process(raw, self.frame_counter)
    }

    /// Process a frame with an explicit index. Never fails; errors are part of
    /// the report.
    pub fn process(&self, raw: RawFrame, frame_index: u64) -> FrameReport {
        let started = Instant::now();
        let mut report = FrameReport {
            index: frame_index,
            blur_score: None,
            result: PipelineResult::Skipped(SkipReason::NotSampled),
            rotated: false,
            elapsed: Duration::ZERO,
            dropped: 0,
        };

        // unsampled frames are never decoded
        if !self.gate.is_sampled(frame_index) {
            report.elapsed = started.elapsed();
            return report;
        }

        let frame = match raw.into_frame() {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("frame {frame_index}: cannot convert raw frame: {err}");
                report.result = PipelineResult::Failed(err.into());
                report.elapsed = started.elapsed();
                return report;
            }
        };

        let score = self.scorer.score(&frame);
        let threshold = self.config.blur_threshold();
        report.blur_score = Some(score);
        if !self.gate.should_process(frame_index, score, threshold) {
            log::debug!("frame {frame_index}: sharp enough ({score:.2} >= {threshold:.2})");
            report.result = PipelineResult::Skipped(SkipReason::Sharp { score, threshold });
            report.elapsed = started.elapsed();
            return report;
        }

        log::debug!("frame {frame_index}: blurry ({score:.2} < {threshold:.2}), enhancing");
        let turned = frame.is_landscape();
        report.result = match self.pipeline.enhance(&frame) {
            Ok(enhanced) if turned && self.config.restore_orientation() => match enhanced.rotate_ccw() {
                Ok(upright) => PipelineResult::Enhanced(upright),
                Err(err) => PipelineResult::Failed(PipelineError::at("orientation restore")(err)),
            },
            Ok(enhanced) => {
                report.rotated = turned;
                PipelineResult::Enhanced(enhanced)
            }
            Err(err) if err.is_shape_contract() => {
                log::warn!("frame {frame_index}: skipped, {err}");
                PipelineResult::Skipped(SkipReason::ShapeContract(err))
            }
            Err(err) => {
                log::error!("frame {frame_index}: enhancement failed: {err}");
                PipelineResult::Failed(err)
            }
        };
        report.elapsed = started.elapsed();
        report
    }
}
