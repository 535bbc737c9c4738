pub mod blur;
pub mod channel;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod gate;
pub mod orchestrator;
pub mod worker;

pub use blur::BlurScorer;
pub use channel::ChannelPipeline;
pub use config::{ConfigError, PipelineConfig};
pub use error::{PipelineError, WorkerError};
pub use gate::FrameGate;
pub use orchestrator::{FrameOrchestrator, FrameReport, PipelineResult, SkipReason};
pub use worker::EnhanceWorker;
