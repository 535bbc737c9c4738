use {
    clarity_base::Vec2,
    clarity_infer::ModelContract,
    serde::{Deserialize, Serialize},
    std::{fmt, path::Path},
};

/// Only every Nth delivered frame is considered for enhancement.
pub const DEFAULT_DECIMATION: u64 = 5;

/// Frames scoring below this Laplacian variance count as blurry.
pub const DEFAULT_BLUR_THRESHOLD: f64 = 1000.0;

/// Spatial input of the FSRCNN x2 model, width x height.
pub const DEFAULT_MODEL_INPUT: Vec2<usize> = Vec2 { x: 320, y: 240 };

pub const DEFAULT_SCALE: usize = 2;

#[derive(Debug)]
pub enum ConfigError {
    Invalid(String),
    Parse(String),
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {msg}"),
            ConfigError::Parse(msg) => write!(f, "configuration parse error: {msg}"),
            ConfigError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Tunables of the enhancement pipeline.
///
/// Missing JSON fields fall back to the defaults:
///
/// ```json
/// { "decimation": 5, "blur_threshold": 1000.0, "model_input": { "x": 320, "y": 240 },
///   "scale": 2, "restore_orientation": false }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    decimation: u64,
    blur_threshold: f64,
    model_input: Vec2<usize>,
    scale: usize,
    restore_orientation: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            decimation: DEFAULT_DECIMATION,
            blur_threshold: DEFAULT_BLUR_THRESHOLD,
            model_input: DEFAULT_MODEL_INPUT,
            scale: DEFAULT_SCALE,
            restore_orientation: false,
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Set the decimation factor (consider every Nth frame).
    pub fn with_decimation(mut self, decimation: u64) -> Self {
        self.decimation = decimation;
        self
    }

    /// Set the blur threshold; frames scoring below it are enhanced.
    pub fn with_blur_threshold(mut self, threshold: f64) -> Self {
        self.blur_threshold = threshold;
        self
    }

    /// Set the model's spatial input size (width x height).
    pub fn with_model_input(mut self, size: Vec2<usize>) -> Self {
        self.model_input = size;
        self
    }

    /// Set the model's upscale factor.
    pub fn with_scale(mut self, scale: usize) -> Self {
        self.scale = scale;
        self
    }

    /// Counter-rotate enhanced frames that were turned for processing.
    pub fn with_restore_orientation(mut self, restore: bool) -> Self {
        self.restore_orientation = restore;
        self
    }

    pub fn decimation(&self) -> u64 {
        self.decimation
    }

    pub fn blur_threshold(&self) -> f64 {
        self.blur_threshold
    }

    pub fn model_input(&self) -> Vec2<usize> {
        self.model_input
    }

    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn restore_orientation(&self) -> bool {
        self.restore_orientation
    }

    /// The model shape contract implied by `model_input` and `scale`.
    pub fn contract(&self) -> ModelContract {
        ModelContract::super_resolution(self.model_input, self.scale)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimation == 0 {
            return Err(ConfigError::Invalid("decimation must be at least 1".to_string()));
        }
        if !self.blur_threshold.is_finite() || self.blur_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "blur threshold must be a non-negative number, got {}",
                self.blur_threshold
            )));
        }
        if self.model_input.x == 0 || self.model_input.y == 0 {
            return Err(ConfigError::Invalid(format!(
                "model input must be non-empty, got {}",
                self.model_input
            )));
        }
        if self.scale == 0 {
            return Err(ConfigError::Invalid("scale must be at least 1".to_string()));
        }
        // the enhanced RGBA buffer must be addressable
        let output_bytes = ModelContract::checked_super_resolution(self.model_input, self.scale)
            .and_then(|contract| contract.output_size().checked_area())
            .and_then(|area| area.checked_mul(4));
        if output_bytes.is_none() {
            return Err(ConfigError::Invalid(format!(
                "model input {} at scale {} overflows the output size",
                self.model_input, self.scale
            )));
        }
        Ok(())
    }
}
