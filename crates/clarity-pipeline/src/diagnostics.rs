use {
    crate::*,
    std::fmt,
};

/// `Blur Score: 123.45`, or `Blur Score: n/a` for unscored frames.
pub fn blur_score_text(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("Blur Score: {score:.2}"),
        None => "Blur Score: n/a".to_string(),
    }
}

/// One-line super-resolution status, e.g. `Super-Resolution: applied 640x480`.
pub fn status_text(result: &PipelineResult) -> String {
    format!("Super-Resolution: {result}")
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotSampled => write!(f, "not sampled"),
            SkipReason::Sharp { score, threshold } => {
                write!(f, "sharp ({score:.2} >= {threshold:.2})")
            }
            SkipReason::ShapeContract(err) => write!(f, "shape contract ({err})"),
        }
    }
}

impl fmt::Display for PipelineResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineResult::Enhanced(frame) => write!(f, "applied {}", frame.size()),
            PipelineResult::Skipped(reason) => write!(f, "skipped, {reason}"),
            PipelineResult::Failed(err) => write!(f, "no output, {err}"),
        }
    }
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {}: {} | {} | {} ms",
            self.index,
            blur_score_text(self.blur_score),
            status_text(&self.result),
            self.elapsed.as_millis()
        )?;
        if self.rotated {
            write!(f, " | rotated")?;
        }
        if self.dropped > 0 {
            write!(f, " | dropped {}", self.dropped)?;
        }
        Ok(())
    }
}
